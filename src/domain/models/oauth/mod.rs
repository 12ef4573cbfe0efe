//! # 소셜 프로바이더 와이어 모델
//!
//! 세 프로바이더(Google/Kakao/Naver)의 토큰/프로필 응답을 역직렬화하는
//! 구조체와, 어댑터가 공통으로 반환하는 정규화된 외부 신원
//! [`NormalizedIdentity`]를 정의합니다.
//!
//! 프로바이더마다 응답 형태가 다릅니다:
//!
//! | 프로바이더 | 프로필 형태 |
//! |-----------|------------|
//! | Google | 평면 필드 (`id`, `email`, `name`) |
//! | Kakao  | 중첩 객체 (`kakao_account` → `profile`) |
//! | Naver  | 래핑 객체 (`response` 안에 실제 프로필) |
//!
//! 어댑터는 이 차이를 흡수하고 동일한 `NormalizedIdentity`를 내보냅니다.

pub mod google;
pub mod kakao;
pub mod naver;

use serde::{Deserialize, Serialize};

/// 프로바이더 응답에서 정규화된 외부 신원
///
/// 이메일은 계정 정합(reconciliation)의 필수 입력이므로, 프로바이더가
/// 이메일을 주지 않으면 어댑터 단계에서 `EmailUnavailable`로 실패합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIdentity {
    /// 프로바이더 측 사용자 고유 ID
    pub external_id: String,
    /// 프로바이더가 검증한 이메일 주소
    pub email: String,
    /// 표시 이름
    pub display_name: String,
}

/// 프로바이더 토큰 엔드포인트의 공통 응답
///
/// 세 프로바이더 모두 OAuth 2.0 표준 토큰 응답을 반환하므로
/// 하나의 구조체를 공유합니다. 에러 응답은 [`OAuthErrorResponse`]로
/// 별도 파싱됩니다.
#[derive(Debug, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// 프로바이더 토큰 엔드포인트의 OAuth 표준 에러 응답
///
/// `error` 코드로 인가 코드 문제(`invalid_grant`)와 클라이언트 자격 증명
/// 문제(`invalid_client` 등)를 구분합니다.
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// 로그인 URL 생성 응답
#[derive(Debug, Serialize)]
pub struct OAuthLoginUrlResponse {
    /// 사용자를 리디렉션할 프로바이더 인증 URL
    pub login_url: String,
    /// CSRF 방지용 state 값
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_with_minimal_fields() {
        // Naver는 expires_in을 문자열이 아닌 필드 없이 줄 때가 있어
        // access_token 외의 필드는 모두 선택적으로 파싱한다
        let json = r#"{"access_token": "AAAA"}"#;
        let parsed: ProviderTokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "AAAA");
        assert!(parsed.refresh_token.is_none());
    }

    #[test]
    fn test_oauth_error_response_parsing() {
        let json = r#"{"error": "invalid_grant", "error_description": "Bad authorization code."}"#;
        let parsed: OAuthErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("invalid_grant"));
    }
}
