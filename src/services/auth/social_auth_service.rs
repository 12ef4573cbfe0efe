//! # 소셜 로그인 오케스트레이터
//!
//! 프로바이더 어댑터 → 정합 → 토큰 발급의 전체 플로우를 연결합니다.
//!
//! ```text
//! 인가 코드
//!     │
//!     ▼
//! 어댑터.exchange() ──► NormalizedIdentity
//!     │
//!     ▼
//! 정합기.reconcile() ──► (Member, created)
//!     │
//!     ▼
//! 코덱.issue_pair() ──► TokenPair
//! ```
//!
//! 각 단계는 자신의 에러만 알고, 이 서비스는 순서만 책임집니다.

use std::sync::Arc;

use crate::config::OAuthProviderKind;
use crate::domain::entities::members::member::Member;
use crate::domain::models::oauth::OAuthLoginUrlResponse;
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};

use super::providers::OAuthProvider;
use super::reconciler::IdentityReconciler;
use super::token_codec::TokenCodec;

/// 소셜 로그인 결과
pub struct SocialLoginOutcome {
    pub member: Member,
    pub tokens: TokenPair,
    /// 이번 로그인으로 계정이 새로 생성되었는지 (201/200 선택용)
    pub created: bool,
}

pub struct SocialAuthService {
    adapters: Vec<Arc<dyn OAuthProvider>>,
    reconciler: IdentityReconciler,
    codec: Arc<TokenCodec>,
}

impl SocialAuthService {
    pub fn new(
        adapters: Vec<Arc<dyn OAuthProvider>>,
        reconciler: IdentityReconciler,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            adapters,
            reconciler,
            codec,
        }
    }

    /// 프로바이더 로그인 URL 생성
    pub fn login_url(&self, provider: OAuthProviderKind) -> AppResult<OAuthLoginUrlResponse> {
        self.adapter_for(provider)?.login_url()
    }

    /// 인가 코드로 로그인 (없으면 가입)
    pub async fn login(
        &self,
        provider: OAuthProviderKind,
        authorization_code: &str,
    ) -> AppResult<SocialLoginOutcome> {
        let adapter = self.adapter_for(provider)?;
        let identity = adapter.exchange(authorization_code).await?;

        let outcome = self.reconciler.reconcile(provider, identity).await?;

        let member_id = outcome.member.id_string().ok_or_else(|| {
            AppError::InternalError("저장된 회원에 ID가 없습니다".to_string())
        })?;
        let tokens = self.codec.issue_pair(
            &member_id,
            &outcome.member.email.address,
            outcome.member.role,
        )?;

        log::info!(
            "소셜 로그인 성공: provider={} member={} created={}",
            provider,
            member_id,
            outcome.created
        );

        Ok(SocialLoginOutcome {
            member: outcome.member,
            tokens,
            created: outcome.created,
        })
    }

    fn adapter_for(&self, provider: OAuthProviderKind) -> AppResult<&Arc<dyn OAuthProvider>> {
        self.adapters
            .iter()
            .find(|a| a.kind() == provider)
            .ok_or_else(|| {
                AppError::InternalError(format!("{} 어댑터가 등록되지 않았습니다", provider))
            })
    }
}
