//! HTTP 계층과 주고받는 데이터 전송 객체

pub mod request;
pub mod response;
