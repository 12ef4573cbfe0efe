//! Google OAuth 2.0 어댑터
//!
//! 토큰 교환은 표준 플로우이고, 프로필 응답은 평면 필드
//! (`id`, `email`, `name`)라서 세 어댑터 중 형태 변환이 가장 단순합니다.

use async_trait::async_trait;

use crate::config::{OAuthClientConfig, OAuthProviderKind, OAuthSharedConfig};
use crate::domain::models::oauth::google::GoogleUserInfo;
use crate::domain::models::oauth::{NormalizedIdentity, OAuthLoginUrlResponse};
use crate::errors::{AppError, AppResult};

use super::{
    build_http_client, build_login_url, check_userinfo_status, exchange_code_for_token,
    generate_oauth_state, OAuthProvider,
};

const GOOGLE_SCOPES: &str = "openid email profile";

pub struct GoogleOAuthAdapter {
    config: OAuthClientConfig,
    shared: OAuthSharedConfig,
    client: reqwest::Client,
}

impl GoogleOAuthAdapter {
    pub fn new(config: OAuthClientConfig, shared: OAuthSharedConfig) -> AppResult<Self> {
        let client = build_http_client(&shared)?;
        Ok(Self {
            config,
            shared,
            client,
        })
    }

    async fn fetch_user_info(&self, provider_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .client
            .get(&self.config.userinfo_uri)
            .bearer_auth(provider_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ProviderUnreachable(format!("Google 프로필 요청 실패: {}", e))
            })?;

        let response = check_userinfo_status(self.kind(), response).await?;

        response.json::<GoogleUserInfo>().await.map_err(|e| {
            AppError::ProviderUnreachable(format!("Google 프로필 파싱 실패: {}", e))
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthAdapter {
    fn kind(&self) -> OAuthProviderKind {
        OAuthProviderKind::Google
    }

    fn login_url(&self) -> AppResult<OAuthLoginUrlResponse> {
        let state = generate_oauth_state(&self.shared)?;
        let login_url = build_login_url(&self.config, GOOGLE_SCOPES, &state);
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
