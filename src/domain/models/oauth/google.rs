//! Google OAuth 2.0 사용자 정보 모델
//!
//! Google OAuth2 UserInfo 엔드포인트(`/oauth2/v2/userinfo`)의 응답을
//! 역직렬화합니다. 세 프로바이더 중 유일하게 평면 필드 구조입니다.

use serde::Deserialize;

use crate::domain::models::oauth::NormalizedIdentity;
use crate::errors::AppError;

/// Google UserInfo API 응답
///
/// ```json
/// {
///   "id": "1234567890",
///   "email": "user@gmail.com",
///   "verified_email": true,
///   "name": "John Doe",
///   "picture": "https://..."
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 ID (변경되지 않음)
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// 공통 신원 형태로 변환합니다. 이메일이 없으면 실패합니다.
    pub fn into_identity(self) -> Result<NormalizedIdentity, AppError> {
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::EmailUnavailable(
                "Google 계정에서 이메일을 제공받지 못했습니다. 이메일 제공에 동의해주세요".to_string(),
            ))?;

        let display_name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.clone());

        Ok(NormalizedIdentity {
            external_id: self.id,
            email,
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_profile_normalization() {
        let json = r#"{
            "id": "g-42",
            "email": "a@x.com",
            "verified_email": true,
            "name": "Ann"
        }"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        let identity = info.into_identity().unwrap();
        assert_eq!(identity.external_id, "g-42");
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.display_name, "Ann");
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let json = r#"{"id": "g-43", "name": "NoMail"}"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        assert!(matches!(
            info.into_identity(),
            Err(AppError::EmailUnavailable(_))
        ));
    }

    #[test]
    fn test_missing_name_falls_back_to_email() {
        let json = r#"{"id": "g-44", "email": "b@x.com"}"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        let identity = info.into_identity().unwrap();
        assert_eq!(identity.display_name, "b@x.com");
    }
}
