//! Kakao OAuth 2.0 어댑터
//!
//! Kakao는 프로필이 `kakao_account` → `profile`로 중첩되어 있고
//! 사용자 ID가 숫자입니다. 형태 변환은 와이어 모델
//! ([`KakaoUserInfo`])이 흡수합니다.

use async_trait::async_trait;

use crate::config::{OAuthClientConfig, OAuthProviderKind, OAuthSharedConfig};
use crate::domain::models::oauth::kakao::KakaoUserInfo;
use crate::domain::models::oauth::{NormalizedIdentity, OAuthLoginUrlResponse};
use crate::errors::{AppError, AppResult};

use super::{
    build_http_client, build_login_url, check_userinfo_status, exchange_code_for_token,
    generate_oauth_state, OAuthProvider,
};

const KAKAO_SCOPES: &str = "account_email profile_nickname";

pub struct KakaoOAuthAdapter {
    config: OAuthClientConfig,
    shared: OAuthSharedConfig,
    client: reqwest::Client,
}

impl KakaoOAuthAdapter {
    pub fn new(config: OAuthClientConfig, shared: OAuthSharedConfig) -> AppResult<Self> {
        let client = build_http_client(&shared)?;
        Ok(Self {
            config,
            shared,
            client,
        })
    }

    async fn fetch_user_info(&self, provider_token: &str) -> AppResult<KakaoUserInfo> {
        let response = self
            .client
            .get(&self.config.userinfo_uri)
            .bearer_auth(provider_token)
            .send()
            .await
            .map_err(|e| {
                AppError::ProviderUnreachable(format!("Kakao 프로필 요청 실패: {}", e))
            })?;

        let response = check_userinfo_status(self.kind(), response).await?;

        response.json::<KakaoUserInfo>().await.map_err(|e| {
            AppError::ProviderUnreachable(format!("Kakao 프로필 파싱 실패: {}", e))
        })
    }
}

#[async_trait]
impl OAuthProvider for KakaoOAuthAdapter {
    fn kind(&self) -> OAuthProviderKind {
        OAuthProviderKind::Kakao
    }

    fn login_url(&self) -> AppResult<OAuthLoginUrlResponse> {
        let state = generate_oauth_state(&self.shared)?;
        let login_url = build_login_url(&self.config, KAKAO_SCOPES, &state);
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
