//! Naver 사용자 정보 모델
//!
//! Naver 회원 프로필 조회 API(`/v1/nid/me`)의 응답을 역직렬화합니다.
//! 실제 프로필이 `response` 객체 안에 래핑되어 있습니다.

use serde::Deserialize;

use crate::domain::models::oauth::NormalizedIdentity;
use crate::errors::AppError;

/// Naver `/v1/nid/me` 응답
///
/// ```json
/// {
///   "resultcode": "00",
///   "message": "success",
///   "response": {
///     "id": "abcdefg-hijklmnop",
///     "email": "user@naver.com",
///     "name": "김철수"
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct NaverUserInfo {
    #[serde(default)]
    pub resultcode: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<NaverProfile>,
}

#[derive(Debug, Deserialize)]
pub struct NaverProfile {
    /// Naver 사용자 고유 식별자
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl NaverUserInfo {
    /// 공통 신원 형태로 변환합니다.
    ///
    /// `response` 래퍼가 없으면 프로필 조회 자체가 실패한 것이므로
    /// `EmailUnavailable`이 아니라 프로바이더 통신 실패로 처리합니다.
    pub fn into_identity(self) -> Result<NormalizedIdentity, AppError> {
        let profile = self.response.ok_or_else(|| {
            AppError::ProviderUnreachable(format!(
                "Naver 프로필 응답이 비어 있습니다 (resultcode: {})",
                self.resultcode.as_deref().unwrap_or("없음")
            ))
        })?;

        let email = profile
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::EmailUnavailable(
                "Naver 계정에서 이메일을 제공받지 못했습니다. 이메일 제공에 동의해주세요".to_string(),
            ))?;

        // 이름이 없으면 닉네임, 둘 다 없으면 이메일로 대체
        let display_name = profile
            .name
            .or(profile.nickname)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(NormalizedIdentity {
            external_id: profile.id,
            email,
            display_name,
        })
    }
}
