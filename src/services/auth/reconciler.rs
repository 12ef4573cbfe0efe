//! # 외부 신원 정합 (Identity Reconciliation)
//!
//! 프로바이더가 확인해 준 외부 신원을 로컬 회원 계정으로 대응시킵니다.
//! 조회 키는 항상 `(provider, provider_external_id)` 쌍입니다.
//! 이메일은 조회 키가 아니므로, 같은 이메일이라도 프로바이더가 다르면
//! 서로 다른 계정입니다(교차 연동 없음).
//!
//! ## 동시 최초 로그인 경합
//!
//! 같은 외부 신원으로 두 요청이 동시에 처음 로그인하면 둘 다
//! "계정 없음"을 관측하고 생성을 시도할 수 있습니다. 한쪽은 유니크
//! 인덱스 위반(`ConflictError`)으로 지는데, 이는 "다른 요청이 방금
//! 만들었다"는 뜻이므로 재조회해서 승자의 계정으로 로그인을 완료합니다.

use std::sync::Arc;

use crate::config::OAuthProviderKind;
use crate::domain::entities::members::member::Member;
use crate::domain::models::oauth::NormalizedIdentity;
use crate::errors::{AppError, AppResult};
use crate::repositories::MemberRepository;

/// 정합 결과
///
/// `created`는 이번 로그인으로 계정이 새로 만들어졌는지를 나타내며,
/// 핸들러가 201/200 상태 코드를 선택하는 데 사용합니다.
/// 재활성화는 신규 생성이 아니므로 `created = false`입니다.
pub struct ReconcileOutcome {
    pub member: Member,
    pub created: bool,
}

/// 외부 신원 → 회원 계정 정합기
pub struct IdentityReconciler {
    repo: Arc<dyn MemberRepository>,
}

impl IdentityReconciler {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    /// 외부 신원을 회원 계정으로 정합합니다.
    ///
    /// - 활성 계정 존재: 그대로 반환
    /// - 비활성 계정 존재: 재활성화 후 반환
    /// - 계정 없음: 신규 생성 (경합 시 승자 계정 재조회)
    pub async fn reconcile(
        &self,
        provider: OAuthProviderKind,
        identity: NormalizedIdentity,
    ) -> AppResult<ReconcileOutcome> {
        if let Some(existing) = self
            .repo
            .find_by_provider(provider, &identity.external_id)
            .await?
        {
            let member = self.ensure_active(existing).await?;
            return Ok(ReconcileOutcome {
                member,
                created: false,
            });
        }

        let nickname = self.unique_nickname(&identity.display_name).await?;
        let candidate = Member::new_social(
            provider,
            identity.external_id.clone(),
            identity.email.clone(),
            nickname,
        )?;

        match self.repo.create(candidate).await {
            Ok(member) => {
                log::info!(
                    "신규 소셜 회원 생성: provider={} email={}",
                    provider,
                    identity.email
                );
                Ok(ReconcileOutcome {
                    member,
                    created: true,
                })
            }
            Err(AppError::ConflictError(_)) => {
                // 경합에서 졌다면 승자의 계정이 이미 존재한다
                match self
                    .repo
                    .find_by_provider(provider, &identity.external_id)
                    .await?
                {
                    Some(winner) => {
                        log::info!(
                            "동시 최초 로그인 경합 감지, 기존 계정으로 진행: provider={}",
                            provider
                        );
                        let member = self.ensure_active(winner).await?;
                        Ok(ReconcileOutcome {
                            member,
                            created: false,
                        })
                    }
                    // 같은 (이메일, 프로바이더)의 다른 외부 신원과 충돌한 경우
                    None => Err(AppError::ConflictError(format!(
                        "이미 {} 계정으로 등록된 이메일입니다",
                        provider
                    ))),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// 비활성 계정이면 재활성화하고 저장합니다.
    async fn ensure_active(&self, mut member: Member) -> AppResult<Member> {
        if member.is_active() {
            return Ok(member);
        }

        member.reactivate();
        self.repo.update(&member).await?;
        log::info!("비활성 계정 재활성화: {}", member.email.address);
        Ok(member)
    }

    /// 전역 유니크 닉네임 결정
    ///
    /// 표시 이름이 이미 사용 중이면 숫자 접미사를 붙여 가며 시도합니다.
    async fn unique_nickname(&self, display_name: &str) -> AppResult<String> {
        let base = display_name.trim();
        let base = if base.is_empty() { "member" } else { base };

        if self.repo.find_by_nickname(base).await?.is_none() {
            return Ok(base.to_string());
        }

        for counter in 1..=1000 {
            let candidate = format!("{}_{}", base, counter);
            if self.repo.find_by_nickname(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError(
            "사용 가능한 닉네임을 찾지 못했습니다".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::repositories::members::memory::InMemoryMemberRepository;

    fn identity(external_id: &str) -> NormalizedIdentity {
        NormalizedIdentity {
            external_id: external_id.to_string(),
            email: "ann@example.com".to_string(),
            display_name: "Ann".to_string(),
        }
    }

    fn social_member(external_id: &str) -> Member {
        Member::new_social(
            OAuthProviderKind::Kakao,
            external_id.to_string(),
            "ann@example.com".to_string(),
            "Ann".to_string(),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn test_first_login_creates_member() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let reconciler = IdentityReconciler::new(repo.clone());

        let outcome = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();

        assert!(outcome.created);
        assert!(outcome.member.id.is_some());
        assert_eq!(outcome.member.provider, Some(OAuthProviderKind::Kakao));
        assert_eq!(outcome.member.provider_external_id.as_deref(), Some("k-1"));
        assert!(outcome.member.email.is_verified);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_repeat_login_reuses_member() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let reconciler = IdentityReconciler::new(repo.clone());

        let first = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();
        let second = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.member.id, second.member.id);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_same_email_different_provider_is_separate_account() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let reconciler = IdentityReconciler::new(repo.clone());

        reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("x-1"))
            .await
            .unwrap();
        let outcome = reconciler
            .reconcile(OAuthProviderKind::Naver, identity("x-1"))
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(repo.len(), 2);
    }

    #[actix_web::test]
    async fn test_deactivated_member_is_reactivated_on_login() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let mut member = social_member("k-1");
        member.deactivate().unwrap();
        repo.seed(member);

        let reconciler = IdentityReconciler::new(repo.clone());
        let outcome = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();

        assert!(!outcome.created);
        assert!(outcome.member.is_active());
        assert!(outcome.member.deactivated_at.is_none());

        // 저장소에도 재활성화 상태가 반영되어야 한다
        let stored = repo
            .find_by_provider(OAuthProviderKind::Kakao, "k-1")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_active());
    }

    #[actix_web::test]
    async fn test_nickname_collision_gets_numeric_suffix() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        // 다른 프로바이더 계정이 이미 "Ann"을 사용 중
        let mut holder = social_member("g-9");
        holder.provider = Some(OAuthProviderKind::Google);
        holder.email.address = "other@example.com".to_string();
        repo.seed(holder);

        let reconciler = IdentityReconciler::new(repo.clone());
        let outcome = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();

        assert_eq!(outcome.member.nickname, "Ann_1");
    }

    /// 동시 최초 로그인 경합 재현용 대역
    ///
    /// 최초 `find_by_provider`는 "계정 없음"을 돌려주지만, 그 사이 다른
    /// 요청(승자)이 이미 계정을 만들어 둔 상황을 흉내 냅니다.
    struct RacingRepository {
        inner: InMemoryMemberRepository,
        first_lookup_done: AtomicBool,
    }

    #[async_trait]
    impl MemberRepository for RacingRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_provider(
            &self,
            provider: OAuthProviderKind,
            external_id: &str,
        ) -> AppResult<Option<Member>> {
            if !self.first_lookup_done.swap(true, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_provider(provider, external_id).await
        }

        async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<Member>> {
            self.inner.find_by_nickname(nickname).await
        }

        async fn create(&self, member: Member) -> AppResult<Member> {
            self.inner.create(member).await
        }

        async fn update(&self, member: &Member) -> AppResult<()> {
            self.inner.update(member).await
        }
    }

    #[actix_web::test]
    async fn test_create_race_resolves_to_winner() {
        let inner = InMemoryMemberRepository::new();
        let winner = inner.seed(social_member("k-1"));

        let repo = Arc::new(RacingRepository {
            inner,
            first_lookup_done: AtomicBool::new(false),
        });
        let reconciler = IdentityReconciler::new(repo);

        let outcome = reconciler
            .reconcile(OAuthProviderKind::Kakao, identity("k-1"))
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.member.id, winner.id);
    }
}
