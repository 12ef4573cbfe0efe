pub mod member;

pub use member::{Email, Member, MemberRole, MemberStatus, SOCIAL_CREDENTIAL_SENTINEL};
