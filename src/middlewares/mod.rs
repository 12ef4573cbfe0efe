//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 게이트 (AuthGate)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 인증 주체를 request extensions에 부착
//! - Required/Optional 모드와 역할 요구사항 지원
//! - 실패 시 사유 태그(`AuthFailureKind`)를 남기고, Required 모드에서만
//!   401/403 응답을 직접 렌더링
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthGate;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/members/me")
//!             .wrap(AuthGate::required())
//!             .route("", web::get().to(me))
//!     )
//!     .service(
//!         web::scope("/api/v1/auth")
//!             .route("/{provider}/login", web::post().to(login))
//!     )
//! ```

pub mod auth_middleware;
pub mod auth_inner;

pub use auth_middleware::AuthGate;
