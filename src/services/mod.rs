//! # 서비스 계층
//!
//! 도메인 규칙을 실행하는 비즈니스 로직 모듈입니다.
//! 핸들러는 HTTP 변환만, 서비스는 규칙만, 리포지토리는 영속화만 담당합니다.

pub mod auth;
pub mod members;
