//! # 토큰 갱신 코디네이터
//!
//! 리프레시 토큰으로 새 토큰 쌍을 발급합니다. 갱신 요청 자체는
//! 인증 게이트를 통과해야 하므로(유효한 액세스 토큰 필요),
//! 요청자 ID와 리프레시 토큰의 주체가 일치하는지까지 확인합니다.
//!
//! 검증 순서는 고정입니다:
//! 토큰 유효성 → 토큰 용도 → 만료 → 주체 일치 → 계정 존재 → 계정 상태

use std::sync::Arc;

use crate::domain::models::token::{TokenPair, TokenType};
use crate::errors::{AppError, AppResult};
use crate::repositories::MemberRepository;

use super::token_codec::TokenCodec;

pub struct RefreshCoordinator {
    codec: Arc<TokenCodec>,
    repo: Arc<dyn MemberRepository>,
}

impl RefreshCoordinator {
    pub fn new(codec: Arc<TokenCodec>, repo: Arc<dyn MemberRepository>) -> Self {
        Self { codec, repo }
    }

    /// 리프레시 토큰을 검증하고 새 토큰 쌍을 발급합니다.
    ///
    /// `requester_id`는 인증 게이트가 액세스 토큰에서 추출한 회원 ID입니다.
    /// 리프레시 토큰의 주체와 다르면 타인의 토큰이므로 거부합니다.
    pub async fn refresh(&self, requester_id: &str, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.codec.parse(refresh_token).map_err(|_| {
            AppError::InvalidRefreshToken("유효하지 않은 리프레시 토큰입니다".to_string())
        })?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::InvalidRefreshToken(
                "리프레시 토큰이 아닙니다".to_string(),
            ));
        }

        if self.codec.is_expired(refresh_token) {
            return Err(AppError::InvalidRefreshToken(
                "만료된 리프레시 토큰입니다".to_string(),
            ));
        }

        if claims.sub != requester_id {
            log::warn!(
                "리프레시 토큰 주체 불일치: requester={} subject={}",
                requester_id,
                claims.sub
            );
            return Err(AppError::OwnerMismatch(
                "본인의 리프레시 토큰만 사용할 수 있습니다".to_string(),
            ));
        }

        let member = self
            .repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound("계정을 찾을 수 없습니다".to_string()))?;

        if !member.is_active() {
            return Err(AppError::AccountDeactivated(
                "비활성화된 계정입니다".to_string(),
            ));
        }

        let member_id = member.id_string().ok_or_else(|| {
            AppError::InternalError("저장된 회원에 ID가 없습니다".to_string())
        })?;

        self.codec
            .issue_pair(&member_id, &member.email.address, member.role)
    }
}
