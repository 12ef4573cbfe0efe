//! # Authentication Configuration Module
//!
//! JWT 토큰과 OAuth 프로바이더 관련 설정을 관리하는 모듈입니다.
//! 모든 설정은 프로세스 시작 시 `from_env()`로 한 번 로드되어
//! 불변 구조체로 각 서비스 생성자에 전달됩니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_TTL_HOURS="1"
//! export JWT_REFRESH_TTL_DAYS="7"
//!
//! export GOOGLE_CLIENT_ID="..." GOOGLE_CLIENT_SECRET="..." GOOGLE_REDIRECT_URI="..."
//! export KAKAO_CLIENT_ID="..."  KAKAO_CLIENT_SECRET="..."  KAKAO_REDIRECT_URI="..."
//! export NAVER_CLIENT_ID="..."  NAVER_CLIENT_SECRET="..."  NAVER_REDIRECT_URI="..."
//!
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! ```

use std::env;
use std::fmt;
use serde::{Deserialize, Serialize};

/// 지원하는 소셜 로그인 프로바이더
///
/// 프로바이더별 어댑터 선택과 `Member.provider` 필드에 사용됩니다.
/// 동일 이메일이라도 프로바이더가 다르면 별도 계정입니다(교차 연동 없음).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProviderKind {
    Google,
    Kakao,
    Naver,
}

impl OAuthProviderKind {
    /// 경로 세그먼트 등 소문자 문자열에서 프로바이더를 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "google" => Some(Self::Google),
            "kakao" => Some(Self::Kakao),
            "naver" => Some(Self::Naver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Kakao => "kakao",
            Self::Naver => "naver",
        }
    }
}

impl fmt::Display for OAuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT 서명/수명 설정
///
/// 프로세스 전역에서 대칭 키(HS256) 하나를 사용합니다.
/// 토큰 코덱 생성자에 전달된 이후에는 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC 서명 시크릿
    pub secret: String,
    /// 액세스 토큰 수명 (시간 단위, 기본 1시간)
    pub access_ttl_hours: i64,
    /// 리프레시 토큰 수명 (일 단위, 기본 7일)
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 로드합니다.
    ///
    /// # Panics
    ///
    /// `JWT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_ttl_hours: env_i64("JWT_ACCESS_TTL_HOURS", 1),
            refresh_ttl_days: env_i64("JWT_REFRESH_TTL_DAYS", 7),
        }
    }
}

/// 소셜 프로바이더 클라이언트 설정
///
/// 세 프로바이더의 어댑터는 요청/응답 형태 변환만 다르고
/// 설정 구조는 동일하므로 하나의 구조체를 공유합니다.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// 사용자를 리디렉션할 프로바이더 인증 엔드포인트
    pub auth_uri: String,
    /// 인가 코드를 프로바이더 토큰으로 교환하는 엔드포인트
    pub token_uri: String,
    /// 프로바이더 토큰으로 프로필을 조회하는 엔드포인트
    pub userinfo_uri: String,
}

impl OAuthClientConfig {
    /// Google OAuth 2.0 설정을 로드합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`
    /// 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn google_from_env() -> Self {
        Self {
            client_id: env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set"),
            client_secret: env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set"),
            redirect_uri: env::var("GOOGLE_REDIRECT_URI").expect("GOOGLE_REDIRECT_URI must be set"),
            auth_uri: env_or("GOOGLE_AUTH_URI", "https://accounts.google.com/o/oauth2/auth"),
            token_uri: env_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
            userinfo_uri: env_or("GOOGLE_USERINFO_URI", "https://www.googleapis.com/oauth2/v2/userinfo"),
        }
    }

    /// Kakao OAuth 2.0 설정을 로드합니다.
    pub fn kakao_from_env() -> Self {
        Self {
            client_id: env::var("KAKAO_CLIENT_ID").expect("KAKAO_CLIENT_ID must be set"),
            client_secret: env::var("KAKAO_CLIENT_SECRET").expect("KAKAO_CLIENT_SECRET must be set"),
            redirect_uri: env::var("KAKAO_REDIRECT_URI").expect("KAKAO_REDIRECT_URI must be set"),
            auth_uri: env_or("KAKAO_AUTH_URI", "https://kauth.kakao.com/oauth/authorize"),
            token_uri: env_or("KAKAO_TOKEN_URI", "https://kauth.kakao.com/oauth/token"),
            userinfo_uri: env_or("KAKAO_USERINFO_URI", "https://kapi.kakao.com/v2/user/me"),
        }
    }

    /// Naver OAuth 2.0 설정을 로드합니다.
    pub fn naver_from_env() -> Self {
        Self {
            client_id: env::var("NAVER_CLIENT_ID").expect("NAVER_CLIENT_ID must be set"),
            client_secret: env::var("NAVER_CLIENT_SECRET").expect("NAVER_CLIENT_SECRET must be set"),
            redirect_uri: env::var("NAVER_REDIRECT_URI").expect("NAVER_REDIRECT_URI must be set"),
            auth_uri: env_or("NAVER_AUTH_URI", "https://nid.naver.com/oauth2.0/authorize"),
            token_uri: env_or("NAVER_TOKEN_URI", "https://nid.naver.com/oauth2.0/token"),
            userinfo_uri: env_or("NAVER_USERINFO_URI", "https://openapi.naver.com/v1/nid/me"),
        }
    }
}

/// 프로바이더 공통 OAuth 설정
#[derive(Debug, Clone)]
pub struct OAuthSharedConfig {
    /// CSRF 방지용 state 생성 시크릿
    pub state_secret: String,
    /// 프로바이더 호출별 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl OAuthSharedConfig {
    pub fn from_env() -> Self {
        Self {
            state_secret: env_or("OAUTH_STATE_SECRET", "dev-oauth-state-secret"),
            request_timeout_secs: env_i64("OAUTH_REQUEST_TIMEOUT_SECS", 10) as u64,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(OAuthProviderKind::parse("google"), Some(OAuthProviderKind::Google));
        assert_eq!(OAuthProviderKind::parse("kakao"), Some(OAuthProviderKind::Kakao));
        assert_eq!(OAuthProviderKind::parse("naver"), Some(OAuthProviderKind::Naver));
        assert_eq!(OAuthProviderKind::parse("github"), None);
    }

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [OAuthProviderKind::Google, OAuthProviderKind::Kakao, OAuthProviderKind::Naver] {
            assert_eq!(OAuthProviderKind::parse(kind.as_str()), Some(kind));
        }
    }
}
