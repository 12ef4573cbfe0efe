//! # 회원 서비스
//!
//! 로컬 가입, 회원 조회, 탈퇴, 관리자 로그인을 담당합니다.
//! 소셜 계정의 생성/재활성화는 정합기
//! ([`crate::services::auth::reconciler`])의 몫입니다.

use std::sync::Arc;

use crate::config::PasswordConfig;
use crate::domain::entities::members::member::{Member, MemberRole};
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult};
use crate::repositories::MemberRepository;
use crate::services::auth::token_codec::TokenCodec;

pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
    password: PasswordConfig,
    codec: Arc<TokenCodec>,
}

impl MemberService {
    pub fn new(
        repo: Arc<dyn MemberRepository>,
        password: PasswordConfig,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            repo,
            password,
            codec,
        }
    }

    /// 로컬 회원 가입
    ///
    /// 비밀번호는 환경별 비용 계수로 bcrypt 해시되어 저장됩니다.
    /// 닉네임/이메일 중복은 저장소의 유니크 제약이 `ConflictError`로
    /// 알려줍니다.
    pub async fn signup(
        &self,
        email: String,
        nickname: String,
        password: String,
    ) -> AppResult<Member> {
        let hash = bcrypt::hash(&password, self.password.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 실패: {}", e)))?;

        let member = Member::new_local(email, nickname, hash)?;
        let created = self.repo.create(member).await?;

        log::info!("로컬 회원 가입: {}", created.email.address);
        Ok(created)
    }

    /// ID로 회원 조회. 없으면 `NotFound`.
    pub async fn find_by_id(&self, member_id: &str) -> AppResult<Member> {
        self.repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::NotFound("계정을 찾을 수 없습니다".to_string()))
    }

    /// 회원 탈퇴 (소프트 삭제)
    ///
    /// 상태만 `Deactivated`로 바꾸고 문서는 남깁니다. 이후 소셜 로그인
    /// 시 정합기가 재활성화할 수 있습니다.
    pub async fn deactivate(&self, member_id: &str) -> AppResult<Member> {
        let mut member = self.find_by_id(member_id).await?;
        member.deactivate()?;
        self.repo.update(&member).await?;

        log::info!("회원 탈퇴 처리: {}", member.email.address);
        Ok(member)
    }

    /// 관리자 로그인 (닉네임 + 비밀번호)
    ///
    /// 검사 순서는 고정입니다: 계정 존재 → 관리자 역할 → 활성 상태 →
    /// 비밀번호. 소셜 가입 계정은 `verify_password`가 항상 false이므로
    /// 비밀번호 단계에서 거부됩니다.
    pub async fn authenticate_admin(
        &self,
        nickname: &str,
        password: &str,
    ) -> AppResult<(Member, TokenPair)> {
        let member = self
            .repo
            .find_by_nickname(nickname)
            .await?
            .ok_or_else(|| AppError::NotFound("계정을 찾을 수 없습니다".to_string()))?;

        if member.role != MemberRole::Admin {
            log::warn!("관리자 로그인 시도 거부 (역할 불일치): {}", nickname);
            return Err(AppError::NotAuthorized(
                "관리자 권한이 없습니다".to_string(),
            ));
        }

        if !member.is_active() {
            return Err(AppError::AccountDeactivated(
                "비활성화된 계정입니다".to_string(),
            ));
        }

        if !member.verify_password(password) {
            log::warn!("관리자 로그인 시도 거부 (비밀번호 불일치): {}", nickname);
            return Err(AppError::AuthenticationError(
                "닉네임 또는 비밀번호가 일치하지 않습니다".to_string(),
            ));
        }

        let member_id = member.id_string().ok_or_else(|| {
            AppError::InternalError("저장된 회원에 ID가 없습니다".to_string())
        })?;
        let tokens = self
            .codec
            .issue_pair(&member_id, &member.email.address, member.role)?;

        log::info!("관리자 로그인 성공: {}", nickname);
        Ok((member, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{JwtConfig, OAuthProviderKind};
    use crate::domain::entities::members::member::MemberStatus;
    use crate::repositories::members::memory::InMemoryMemberRepository;

    fn service(repo: Arc<InMemoryMemberRepository>) -> MemberService {
        MemberService::new(
            repo,
            PasswordConfig { bcrypt_cost: 4 },
            Arc::new(TokenCodec::new(&JwtConfig {
                secret: "test-secret".to_string(),
                access_ttl_hours: 1,
                refresh_ttl_days: 7,
            })),
        )
    }

    fn seed_admin(repo: &InMemoryMemberRepository, password: &str) -> Member {
        let hash = bcrypt::hash(password, 4).unwrap();
        let mut admin = Member::new_local(
            "admin@example.com".to_string(),
            "admin".to_string(),
            hash,
        )
        .unwrap();
        admin.role = MemberRole::Admin;
        repo.seed(admin)
    }

    #[actix_web::test]
    async fn test_signup_hashes_password() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service = service(repo.clone());

        let member = service
            .signup(
                "new@example.com".to_string(),
                "newbie".to_string(),
                "SecurePass123!".to_string(),
            )
            .await
            .unwrap();

        assert_ne!(member.credential_secret, "SecurePass123!");
        assert!(member.verify_password("SecurePass123!"));
        assert_eq!(member.role, MemberRole::User);
        assert!(!member.email.is_verified);
    }

    #[actix_web::test]
    async fn test_deactivate_is_soft_delete() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service = service(repo.clone());

        let member = service
            .signup(
                "bye@example.com".to_string(),
                "leaver".to_string(),
                "SecurePass123!".to_string(),
            )
            .await
            .unwrap();
        let member_id = member.id_string().unwrap();

        let deactivated = service.deactivate(&member_id).await.unwrap();
        assert_eq!(deactivated.status, MemberStatus::Deactivated);

        // 문서는 남아 있어야 한다
        let stored = service.find_by_id(&member_id).await.unwrap();
        assert_eq!(stored.status, MemberStatus::Deactivated);
    }

    #[actix_web::test]
    async fn test_double_deactivate_rejected() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service = service(repo.clone());

        let member = service
            .signup(
                "bye@example.com".to_string(),
                "leaver".to_string(),
                "SecurePass123!".to_string(),
            )
            .await
            .unwrap();
        let member_id = member.id_string().unwrap();

        service.deactivate(&member_id).await.unwrap();
        let result = service.deactivate(&member_id).await;
        assert!(matches!(result, Err(AppError::AccountDeactivated(_))));
    }

    #[actix_web::test]
    async fn test_admin_login_succeeds() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        seed_admin(&repo, "AdminPass123!");
        let service = service(repo);

        let (member, tokens) = service
            .authenticate_admin("admin", "AdminPass123!")
            .await
            .unwrap();
        assert_eq!(member.role, MemberRole::Admin);
        assert!(!tokens.access_token.is_empty());
    }

    #[actix_web::test]
    async fn test_admin_login_unknown_nickname() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service = service(repo);

        let result = service.authenticate_admin("ghost", "whatever").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_admin_login_rejects_regular_member() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let hash = bcrypt::hash("UserPass123!", 4).unwrap();
        repo.seed(
            Member::new_local(
                "user@example.com".to_string(),
                "regular".to_string(),
                hash,
            )
            .unwrap(),
        );
        let service = service(repo);

        // 비밀번호가 맞아도 역할 검사가 먼저다
        let result = service.authenticate_admin("regular", "UserPass123!").await;
        assert!(matches!(result, Err(AppError::NotAuthorized(_))));
    }

    #[actix_web::test]
    async fn test_admin_login_rejects_deactivated_admin() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let mut admin = seed_admin(&repo, "AdminPass123!");
        admin.deactivate().unwrap();
        repo.update(&admin).await.unwrap();
        let service = service(repo);

        let result = service.authenticate_admin("admin", "AdminPass123!").await;
        assert!(matches!(result, Err(AppError::AccountDeactivated(_))));
    }

    #[actix_web::test]
    async fn test_admin_login_wrong_password() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        seed_admin(&repo, "AdminPass123!");
        let service = service(repo);

        let result = service.authenticate_admin("admin", "wrong").await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_admin_login_rejects_social_admin_with_sentinel() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let mut social_admin = Member::new_social(
            OAuthProviderKind::Google,
            "g-admin".to_string(),
            "sadmin@example.com".to_string(),
            "sadmin".to_string(),
        )
        .unwrap();
        social_admin.role = MemberRole::Admin;
        repo.seed(social_admin);
        let service = service(repo);

        // 센티널 값을 비밀번호로 넣어도 통과할 수 없다
        let result = service.authenticate_admin("sadmin", "{social}").await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
