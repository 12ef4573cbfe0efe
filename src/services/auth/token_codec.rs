//! JWT 토큰 코덱
//!
//! HMAC-SHA256 서명 기반의 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 생성 이후 가변 상태가 없으므로 잠금 없이 동시에 사용해도 안전합니다.
//! I/O를 수행하지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::members::member::MemberRole;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::errors::{AppError, AppResult};

/// 토큰 발급/파싱 담당
///
/// 프로세스 전역 대칭 키 하나로 서명합니다. 키는 시작 시
/// [`JwtConfig`]에서 한 번 로드되어 이후 불변입니다.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::hours(config.access_ttl_hours),
            refresh_ttl: Duration::days(config.refresh_ttl_days),
        }
    }

    /// 액세스 토큰 발급
    ///
    /// 클레임: `{sub, email, role, token_type=access, iat, exp}`.
    /// 만료는 현재 시각 + 설정된 액세스 TTL(기본 1시간)입니다.
    pub fn issue_access(
        &self,
        member_id: &str,
        email: &str,
        role: MemberRole,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: member_id.to_string(),
            email: Some(email.to_string()),
            role: Some(role),
            token_type: TokenType::Access,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// 리프레시 토큰 발급
    ///
    /// 최소 클레임 `{sub, token_type=refresh, iat, exp}`만 담습니다.
    /// 만료는 현재 시각 + 설정된 리프레시 TTL(기본 7일)입니다.
    pub fn issue_refresh(&self, member_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: member_id.to_string(),
            email: None,
            role: None,
            token_type: TokenType::Refresh,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// 액세스 + 리프레시 토큰 쌍 발급
    pub fn issue_pair(
        &self,
        member_id: &str,
        email: &str,
        role: MemberRole,
    ) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(member_id, email, role)?,
            refresh_token: self.issue_refresh(member_id)?,
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// 서명/구조 검증 및 클레임 추출
    ///
    /// 만료 여부와 무관하게 동작합니다. 만료된 토큰도 서명이 올바르면
    /// 파싱에 성공하므로, "깨진 토큰"과 "만료된 토큰"을 구분할 수 있습니다.
    pub fn parse(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e))
            })
    }

    /// 만료 여부 확인
    ///
    /// 파싱에 실패하는 토큰은 만료된 것으로 취급합니다(fail closed).
    /// `exp`가 현재 시각과 정확히 같은 순간의 결과는 정의하지 않습니다.
    pub fn is_expired(&self, token: &str) -> bool {
        match self.parse(token) {
            Ok(claims) => claims.exp < Utc::now().timestamp(),
            Err(_) => true,
        }
    }

    /// 토큰 주체(회원 ID) 추출
    pub fn subject_of(&self, token: &str) -> AppResult<String> {
        Ok(self.parse(token)?.sub)
    }

    /// 토큰 이메일 클레임 추출 (액세스 토큰 전용)
    pub fn email_of(&self, token: &str) -> AppResult<Option<String>> {
        Ok(self.parse(token)?.email)
    }

    /// 토큰 역할 클레임 추출 (액세스 토큰 전용)
    pub fn role_of(&self, token: &str) -> AppResult<Option<MemberRole>> {
        Ok(self.parse(token)?.role)
    }

    /// 토큰 용도 추출
    pub fn type_of(&self, token: &str) -> AppResult<TokenType> {
        Ok(self.parse(token)?.token_type)
    }

    fn sign(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }
}

/// Bearer 토큰에서 실제 토큰 부분 추출
///
/// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을
/// 추출합니다. 형식이 다르면 None을 반환합니다.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}
