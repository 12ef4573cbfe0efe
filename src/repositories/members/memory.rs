//! 테스트용 인메모리 회원 리포지토리
//!
//! MongoDB 없이 정합/갱신/관리자 로그인 로직을 검증하기 위한 대역입니다.
//! 프로덕션 구현과 동일한 유니크 제약을 흉내 내어
//! 중복 저장 시 `ConflictError`를 반환합니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::OAuthProviderKind;
use crate::domain::entities::members::member::Member;
use crate::errors::{AppError, AppResult};

use super::member_repo::MemberRepository;

#[derive(Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트 셋업용: 제약 검사 없이 회원을 미리 넣어 둡니다.
    pub fn seed(&self, mut member: Member) -> Member {
        if member.id.is_none() {
            member.id = Some(ObjectId::new());
        }
        self.members.lock().unwrap().push(member.clone());
        member
    }

    pub fn len(&self) -> usize {
        self.members.lock().unwrap().len()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == Some(object_id))
            .cloned())
    }

    async fn find_by_provider(
        &self,
        provider: OAuthProviderKind,
        external_id: &str,
    ) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.provider == Some(provider)
                    && m.provider_external_id.as_deref() == Some(external_id)
            })
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.nickname == nickname)
            .cloned())
    }

    async fn create(&self, mut member: Member) -> AppResult<Member> {
        let mut members = self.members.lock().unwrap();

        let provider_pair_taken = member.provider.is_some()
            && members.iter().any(|m| {
                m.provider == member.provider
                    && m.provider_external_id == member.provider_external_id
            });
        let email_per_provider_taken = members.iter().any(|m| {
            m.email.address == member.email.address && m.provider == member.provider
        });

        if provider_pair_taken || email_per_provider_taken {
            return Err(AppError::ConflictError(
                "이미 존재하는 회원입니다".to_string(),
            ));
        }

        member.id = Some(ObjectId::new());
        members.push(member.clone());
        Ok(member)
    }

    async fn update(&self, member: &Member) -> AppResult<()> {
        let mut members = self.members.lock().unwrap();
        match members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("계정을 찾을 수 없습니다".to_string())),
        }
    }
}
