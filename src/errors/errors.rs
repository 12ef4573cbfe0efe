//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증/토큰 서브시스템을 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 전파 정책
//!
//! 프로바이더 어댑터와 정합(reconcile)/갱신(refresh) 로직의 실패는
//! 타입이 있는 에러로 핸들러까지 전파되고, 최외곽 경계(`ResponseError`)에서
//! HTTP 상태 코드와 구조화된 문제 본문 `{status, detail, timestamp, exception}`
//! 으로 변환됩니다. 인증 게이트는 예외를 던지지 않고 요청에 실패 태그만
//! 남기며, 그 태그는 미들웨어가 `{success: false, message}` 본문으로
//! 렌더링합니다 (`middlewares` 모듈 참조).
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn refresh(token: &str) -> Result<TokenPair, AppError> {
//!     if codec.is_expired(token) {
//!         return Err(AppError::InvalidRefreshToken(
//!             "리프레시 토큰이 만료되었거나 유효하지 않습니다".to_string(),
//!         ));
//!     }
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증/토큰 서브시스템에서 발생할 수 있는 모든 종류의 에러를 포괄하는
/// 열거형입니다. 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 - 계정 미존재 포함 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 - 유니크 제약 위반 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 - 잘못된 자격 증명 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 - 역할 검증 실패 (403 Forbidden)
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// 비활성화된 계정 (400 Bad Request)
    #[error("Account deactivated: {0}")]
    AccountDeactivated(String),

    /// 잘못되었거나 만료된 인가 코드 (400 Bad Request)
    #[error("Invalid authorization code: {0}")]
    InvalidAuthorizationCode(String),

    /// 프로바이더가 클라이언트 자격 증명을 거부함 (400 Bad Request)
    #[error("Provider authentication failed: {0}")]
    ProviderAuthenticationFailed(String),

    /// 프로바이더 통신 실패 - 네트워크/타임아웃 (500 Internal Server Error)
    #[error("Provider unreachable: {0}")]
    ProviderUnreachable(String),

    /// 프로바이더가 이메일을 제공하지 않음 (400 Bad Request)
    #[error("Email unavailable: {0}")]
    EmailUnavailable(String),

    /// 리프레시 토큰 타입/만료 검증 실패 (400 Bad Request)
    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(String),

    /// 리프레시 토큰 소유자 불일치 (400 Bad Request)
    #[error("Owner mismatch: {0}")]
    OwnerMismatch(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 문제 본문의 `exception` 필드에 들어가는 에러 종류 식별자
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "ValidationError",
            AppError::NotFound(_) => "NotFound",
            AppError::ConflictError(_) => "ConflictError",
            AppError::AuthenticationError(_) => "AuthenticationError",
            AppError::NotAuthorized(_) => "NotAuthorized",
            AppError::AccountDeactivated(_) => "AccountDeactivated",
            AppError::InvalidAuthorizationCode(_) => "InvalidAuthorizationCode",
            AppError::ProviderAuthenticationFailed(_) => "ProviderAuthenticationFailed",
            AppError::ProviderUnreachable(_) => "ProviderUnreachable",
            AppError::EmailUnavailable(_) => "EmailUnavailable",
            AppError::InvalidRefreshToken(_) => "InvalidRefreshToken",
            AppError::OwnerMismatch(_) => "OwnerMismatch",
            AppError::DatabaseError(_) => "DatabaseError",
            AppError::InternalError(_) => "InternalError",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_)
            | AppError::AccountDeactivated(_)
            | AppError::InvalidAuthorizationCode(_)
            | AppError::ProviderAuthenticationFailed(_)
            | AppError::EmailUnavailable(_)
            | AppError::InvalidRefreshToken(_)
            | AppError::OwnerMismatch(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            AppError::ProviderUnreachable(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 구조화된 문제 본문으로 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("서버 에러 응답: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "status": status.as_u16(),
            "detail": self.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "exception": self.kind(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("닉네임은 비어 있을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("계정을 찾을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("비밀번호가 일치하지 않습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_authorized_error_response() {
        let error = AppError::NotAuthorized("관리자 권한이 필요합니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_refresh_path_errors_are_bad_request() {
        let owner = AppError::OwnerMismatch("토큰 소유자가 일치하지 않습니다".to_string());
        let invalid = AppError::InvalidRefreshToken("유효하지 않은 리프레시 토큰".to_string());
        assert_eq!(owner.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_unreachable_is_server_error() {
        let error = AppError::ProviderUnreachable("connection timed out".to_string());
        assert_eq!(
            error.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_exception_kind_matches_variant() {
        assert_eq!(
            AppError::OwnerMismatch(String::new()).kind(),
            "OwnerMismatch"
        );
        assert_eq!(
            AppError::EmailUnavailable(String::new()).kind(),
            "EmailUnavailable"
        );
    }
}
