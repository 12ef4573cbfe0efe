//! JWT 인증 토큰 클레임 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 2개의 용도별 토큰(액세스/리프레시)을
//! 페어링 한 정보를 표시합니다. 토큰은 서버에 저장되지 않고
//! 서명된 클레임 집합으로만 존재합니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::members::member::MemberRole;

/// 토큰 용도 구분
///
/// 액세스 토큰이 리프레시 토큰 자리에(또는 그 반대로) 쓰이는 것을
/// 막기 위해 클레임에 항상 포함됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다.
/// 리프레시 토큰은 `{sub, token_type, iat, exp}`만 담고
/// `email`/`role`은 비워 둡니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (회원 ID, ObjectId 16진수 문자열)
    pub sub: String,
    /// 회원 이메일 (액세스 토큰 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 회원 역할 (액세스 토큰 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    /// 토큰 용도 (access / refresh)
    pub token_type: TokenType,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 클라이언트에게 전달되는 토큰 집합을 나타냅니다.
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
