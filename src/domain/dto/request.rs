//! HTTP 요청 본문 DTO
//!
//! 핸들러 진입 시 `validator`로 형식 검증을 수행합니다.
//! 비즈니스 규칙 검증(중복, 권한 등)은 서비스 계층의 책임입니다.

use serde::Deserialize;
use validator::Validate;

/// 소셜 로그인 요청 (`POST /auth/{provider}/login`)
#[derive(Debug, Deserialize, Validate)]
pub struct SocialLoginRequest {
    /// 프로바이더 콜백에서 받은 일회용 인가 코드
    #[validate(length(min = 1, message = "인가 코드가 비어 있습니다"))]
    pub authorization_code: String,
}

/// 토큰 갱신 요청 (`POST /auth/refresh`)
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 비어 있습니다"))]
    pub refresh_token: String,
}

/// 관리자 로그인 요청 (`POST /admin/auth/login`)
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "닉네임이 비어 있습니다"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
}

/// 로컬 회원 가입 요청 (`POST /members`)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(email(message = "유효하지 않은 이메일 형식입니다"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "닉네임은 1자 이상 30자 이하여야 합니다"))]
    pub nickname: String,
    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_authorization_code_fails_validation() {
        let request = SocialLoginRequest {
            authorization_code: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_short_password_fails_validation() {
        let request = CreateMemberRequest {
            email: "a@b.com".to_string(),
            nickname: "tester".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
