pub mod member_repo;

#[cfg(test)]
pub mod memory;

pub use member_repo::{MemberRepository, MongoMemberRepository};
