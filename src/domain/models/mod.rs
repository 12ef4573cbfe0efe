//! 영속화되지 않는 도메인 모델

pub mod token;
pub mod auth;
pub mod oauth;
