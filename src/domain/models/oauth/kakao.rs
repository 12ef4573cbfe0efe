//! Kakao 사용자 정보 모델
//!
//! Kakao 사용자 정보 API(`/v2/user/me`)의 응답을 역직렬화합니다.
//! 프로필이 `kakao_account` → `profile`로 이중 중첩되어 있고,
//! 사용자 ID가 숫자 타입인 점이 Google과 다릅니다.

use serde::Deserialize;

use crate::domain::models::oauth::NormalizedIdentity;
use crate::errors::AppError;

/// Kakao `/v2/user/me` 응답
///
/// ```json
/// {
///   "id": 123456789,
///   "kakao_account": {
///     "email": "user@kakao.com",
///     "profile": { "nickname": "홍길동" }
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct KakaoUserInfo {
    /// Kakao 회원번호 (숫자)
    pub id: i64,
    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoAccount {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
    #[serde(default)]
    pub profile: Option<KakaoProfile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl KakaoUserInfo {
    /// 공통 신원 형태로 변환합니다. 이메일이 없으면 실패합니다.
    ///
    /// 이메일 제공은 Kakao 동의 항목 설정에 따라 빠질 수 있으므로
    /// 사용자에게 동의를 안내하는 메시지로 실패시킵니다.
    pub fn into_identity(self) -> Result<NormalizedIdentity, AppError> {
        let external_id = self.id.to_string();
        let account = self.kakao_account.unwrap_or_default();

        let email = account
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::EmailUnavailable(
                "Kakao 계정에서 이메일을 제공받지 못했습니다. 이메일 제공에 동의해주세요".to_string(),
            ))?;

        let display_name = account
            .profile
            .and_then(|p| p.nickname)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(NormalizedIdentity {
            external_id,
            email,
            display_name,
        })
    }
}
