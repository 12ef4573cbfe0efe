//! # Domain Module
//!
//! 인증/토큰 서브시스템의 도메인 계층입니다.
//!
//! ## 모듈 구성
//!
//! - [`entities`] - 영속화되는 집합체 (`Member`)
//! - [`models`] - 영속화되지 않는 도메인 모델 (토큰 클레임, 인증 주체, 프로바이더 와이어 모델)
//! - [`dto`] - HTTP 요청/응답 DTO

pub mod entities;
pub mod models;
pub mod dto;

pub use dto::request::*;
pub use dto::response::*;
