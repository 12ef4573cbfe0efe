//! # 소셜 프로바이더 어댑터
//!
//! OAuth 2.0 Authorization Code Flow의 프로바이더 측 절반을 담당합니다.
//! 어댑터는 일회용 인가 코드를 받아 프로바이더 토큰으로 교환하고,
//! 그 토큰으로 프로필을 조회하여 정규화된 신원
//! [`NormalizedIdentity`]를 반환합니다.
//!
//! 세 어댑터(Google/Kakao/Naver)는 요청/응답의 형태 변환만 다르고
//! 플로우는 동일하므로, 토큰 교환과 에러 분류는 이 모듈의 공통
//! 함수로 공유합니다.
//!
//! ## 에러 분류
//!
//! | 상황 | 에러 |
//! |------|------|
//! | 네트워크/타임아웃 | `ProviderUnreachable` |
//! | `invalid_grant` (코드 만료/재사용) | `InvalidAuthorizationCode` |
//! | `invalid_client` 또는 401 | `ProviderAuthenticationFailed` |
//! | 프로바이더 5xx | `ProviderUnreachable` |
//!
//! 어댑터는 리포지토리를 전혀 알지 못합니다. 계정 생성/재활성화는
//! 정합 단계([`crate::services::auth::reconciler`])의 책임입니다.

pub mod google;
pub mod kakao;
pub mod naver;

pub use google::GoogleOAuthAdapter;
pub use kakao::KakaoOAuthAdapter;
pub use naver::NaverOAuthAdapter;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::config::{OAuthClientConfig, OAuthProviderKind, OAuthSharedConfig};
use crate::domain::models::oauth::{
    NormalizedIdentity, OAuthErrorResponse, OAuthLoginUrlResponse, ProviderTokenResponse,
};
use crate::errors::{AppError, AppResult};

/// 소셜 프로바이더 어댑터 계약
///
/// 구현체는 인가 코드 하나로 "프로바이더 측 사용자가 누구인지"까지만
/// 알아내면 됩니다. 이후 단계(회원 조회/생성, 토큰 발급)는 상위
/// 서비스가 담당합니다.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// 이 어댑터가 담당하는 프로바이더
    fn kind(&self) -> OAuthProviderKind;

    /// 사용자를 리디렉션할 프로바이더 로그인 URL 생성
    fn login_url(&self) -> AppResult<OAuthLoginUrlResponse>;

    /// 인가 코드를 프로바이더 토큰으로 교환하고 프로필을 조회하여
    /// 정규화된 신원을 반환합니다.
    async fn exchange(&self, authorization_code: &str) -> AppResult<NormalizedIdentity>;
}

/// 프로바이더 HTTP 클라이언트 생성
///
/// 어댑터마다 타임아웃이 설정된 클라이언트를 하나씩 만들어
/// 생성자에서 보관합니다. reqwest 클라이언트는 내부적으로
/// 커넥션 풀을 공유하므로 복제 비용이 낮습니다.
pub(crate) fn build_http_client(shared: &OAuthSharedConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(shared.request_timeout_secs))
        .build()
        .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))
}

/// CSRF 방지용 OAuth state 생성
///
/// `timestamp:secret`을 SHA-256으로 해시한 16진수 문자열입니다.
pub(crate) fn generate_oauth_state(shared: &OAuthSharedConfig) -> AppResult<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
        .as_secs();

    let state_data = format!("{}:{}", timestamp, shared.state_secret);
    Ok(format!("{:x}", Sha256::digest(state_data.as_bytes())))
}

/// 로그인 URL 조립
///
/// `scope`가 빈 문자열이면 scope 매개변수를 생략합니다(Naver).
pub(crate) fn build_login_url(
    config: &OAuthClientConfig,
    scope: &str,
    state: &str,
) -> String {
    let mut params = vec![
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("response_type", "code"),
        ("state", state),
    ];
    if !scope.is_empty() {
        params.push(("scope", scope));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.auth_uri, query_string)
}

/// 인가 코드 → 프로바이더 토큰 교환 (공통)
///
/// OAuth 2.0 표준 `grant_type=authorization_code` 요청입니다.
/// 프로바이더별 에러 응답을 도메인 에러로 분류하는 것이 핵심입니다.
pub(crate) async fn exchange_code_for_token(
    client: &reqwest::Client,
    config: &OAuthClientConfig,
    kind: OAuthProviderKind,
    authorization_code: &str,
) -> AppResult<ProviderTokenResponse> {
    let params = [
        ("code", authorization_code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = client
        .post(&config.token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|e| {
            AppError::ProviderUnreachable(format!("{} 토큰 요청 실패: {}", kind, e))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_token_error(kind, status, &body));
    }

    response.json::<ProviderTokenResponse>().await.map_err(|e| {
        AppError::ProviderUnreachable(format!("{} 토큰 응답 파싱 실패: {}", kind, e))
    })
}

/// 토큰 엔드포인트 에러 응답 분류
///
/// 클라이언트가 고칠 수 있는 문제(만료된 코드)와 운영자가 고쳐야 하는
/// 문제(클라이언트 자격 증명), 재시도 대상(프로바이더 장애)을 구분합니다.
fn classify_token_error(
    kind: OAuthProviderKind,
    status: reqwest::StatusCode,
    body: &str,
) -> AppError {
    if status.is_server_error() {
        return AppError::ProviderUnreachable(format!(
            "{} 토큰 엔드포인트 오류 ({}): {}",
            kind, status, body
        ));
    }

    let parsed = serde_json::from_str::<OAuthErrorResponse>(body).ok();
    let error_code = parsed.as_ref().and_then(|e| e.error.as_deref());

    match error_code {
        Some("invalid_grant") => AppError::InvalidAuthorizationCode(format!(
            "{} 인가 코드가 만료되었거나 이미 사용되었습니다",
            kind
        )),
        Some("invalid_client") | Some("unauthorized_client") => {
            AppError::ProviderAuthenticationFailed(format!(
                "{} 클라이언트 자격 증명이 거부되었습니다",
                kind
            ))
        }
        _ if status == reqwest::StatusCode::UNAUTHORIZED => {
            AppError::ProviderAuthenticationFailed(format!(
                "{} 토큰 교환 인증 실패 ({})",
                kind, status
            ))
        }
        _ => AppError::InvalidAuthorizationCode(format!(
            "{} 토큰 교환 거부 ({}): {}",
            kind,
            status,
            parsed
                .and_then(|e| e.error_description)
                .unwrap_or_else(|| body.to_string())
        )),
    }
}

/// 프로필 엔드포인트 응답의 상태 코드 검사 (공통)
///
/// 성공이 아니면 본문을 읽어 도메인 에러로 변환합니다.
pub(crate) async fn check_userinfo_status(
    kind: OAuthProviderKind,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        Err(AppError::ProviderAuthenticationFailed(format!(
            "{} 프로필 조회 인증 실패: {}",
            kind, body
        )))
    } else {
        Err(AppError::ProviderUnreachable(format!(
            "{} 프로필 조회 실패 ({}): {}",
            kind, status, body
        )))
    }
}
