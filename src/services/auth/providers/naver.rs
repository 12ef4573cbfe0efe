//! Naver OAuth 2.0 어댑터
//!
//! Naver는 로그인 URL에 scope 매개변수가 없고(동의 항목은 앱 설정에서
//! 관리), 프로필이 `response` 객체로 래핑되어 내려옵니다.

use async_trait::async_trait;

use crate::config::{OAuthClientConfig, OAuthProviderKind, OAuthSharedConfig};
use crate::domain::models::oauth::naver::NaverUserInfo;
use crate::domain::models::oauth::{NormalizedIdentity, OAuthLoginUrlResponse};
use crate::errors::{AppError, AppResult};

use super::{
    build_http_client, build_login_url, check_userinfo_status, exchange_code_for_token,
    generate_oauth_state, OAuthProvider,
};

pub struct NaverOAuthAdapter {
    config: OAuthClientConfig,
    shared: OAuthSharedConfig,
    client: reqwest::Client,
}

impl NaverOAuthAdapter {
    pub fn new(config: OAuthClientConfig, shared: OAuthSharedConfig) -> AppResult<Self> {
        let client = build_http_client(&shared)?;
        Ok(Self {
            config,
            shared,
            client,
        })
    }

    async fn fetch_user_info(&self, provider_token: &str) -> AppResult<NaverUserInfo> {
        let response = self
            .client
            .get(&self.config.userinfo_uri)
            .bearer_auth(provider_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ProviderUnreachable(format!("Naver 프로필 요청 실패: {}", e))
            })?;

        let response = check_userinfo_status(self.kind(), response).await?;

        response.json::<NaverUserInfo>().await.map_err(|e| {
            AppError::ProviderUnreachable(format!("Naver 프로필 파싱 실패: {}", e))
        })
    }
}

#[async_trait]
impl OAuthProvider for NaverOAuthAdapter {
    fn kind(&self) -> OAuthProviderKind {
        OAuthProviderKind::Naver
    }

    fn login_url(&self) -> AppResult<OAuthLoginUrlResponse> {
        let state = generate_oauth_state(&self.shared)?;
        let login_url = build_login_url(&self.config, "", &state);
        Ok(OAuthLoginUrlResponse { login_url, state })
    }

    async fn exchange(&self, authorization_code: &str) -> AppResult<NormalizedIdentity> {
        let token = exchange_code_for_token(
            &self.client,
            &self.config,
            self.kind(),
            authorization_code,
        )
        .await?;

        let user_info = self.fetch_user_info(&token.access_token).await?;
        user_info.into_identity()
    }
}
