//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Web, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 변환                 ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 요청 파싱, 형식 검증, 상태 코드 선택만 담당합니다.
//! 의존성은 전부 `web::Data`로 주입받으며 전역 상태가 없습니다.

pub mod auth;
pub mod members;
