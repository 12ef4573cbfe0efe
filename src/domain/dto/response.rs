//! HTTP 응답 본문 DTO

use serde::Serialize;

use crate::config::OAuthProviderKind;
use crate::domain::entities::members::member::{Member, MemberRole, MemberStatus};
use crate::domain::models::token::TokenPair;

/// 회원 정보 응답
///
/// `credential_secret` 등 민감한 필드는 절대 포함하지 않습니다.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub email: String,
    pub is_email_verified: bool,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<OAuthProviderKind>,
    pub role: MemberRole,
    pub status: MemberStatus,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id_string().unwrap_or_default(),
            email: member.email.address.clone(),
            is_email_verified: member.email.is_verified,
            nickname: member.nickname.clone(),
            provider: member.provider,
            role: member.role,
            status: member.status,
        }
    }
}

/// 로그인 응답 (소셜/관리자 공통)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub member: MemberResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: &'static str,
}

impl LoginResponse {
    pub fn new(member: &Member, pair: TokenPair) -> Self {
        Self {
            member: MemberResponse::from(member),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: "Bearer",
        }
    }
}

/// 토큰 갱신 응답
#[derive(Debug, Serialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: &'static str,
}

impl From<TokenPair> for TokenRefreshResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: "Bearer",
        }
    }
}
