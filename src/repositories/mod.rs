//! 데이터 액세스 계층
//!
//! 상위 계층은 트레이트(계약)에만 의존합니다.

pub mod members;

pub use members::{MemberRepository, MongoMemberRepository};
