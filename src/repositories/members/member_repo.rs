//! # 회원 리포지토리 구현
//!
//! 회원 엔티티의 데이터 액세스 계층입니다. 상위 계층(정합, 갱신, 회원 서비스)은
//! [`MemberRepository`] 트레이트(save/findBy* 계약)에만 의존하고,
//! MongoDB 구현체는 그 계약의 기본 구현입니다.
//!
//! ## 유니크 제약
//!
//! - `(provider, provider_external_id)` - 둘 다 존재하는 문서에 한해 유니크.
//!   동시 최초 로그인 경합의 마지막 방어선입니다.
//! - `(email.address, provider)` - 같은 이메일이 프로바이더별로 한 번씩
//!   (로컬 계정 포함) 존재할 수 있습니다.
//! - `nickname` - 전역 유니크.
//!
//! 중복 키 위반(코드 11000)은 `AppError::ConflictError`로 변환되어
//! 정합 로직이 "다른 요청이 방금 생성했다"로 해석하고 재조회할 수 있습니다.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::config::OAuthProviderKind;
use crate::db::Database;
use crate::domain::entities::members::member::Member;
use crate::errors::{AppError, AppResult};

/// 회원 저장소 계약
///
/// 이 코어가 저장소에 요구하는 전부입니다. 프롬프트/카테고리 등
/// 다른 집합체의 저장소는 이 코어의 관심사가 아닙니다.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// ID(ObjectId 16진수 문자열)로 회원 조회
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>>;

    /// `(provider, provider_external_id)` 쌍으로 회원 조회
    async fn find_by_provider(
        &self,
        provider: OAuthProviderKind,
        external_id: &str,
    ) -> AppResult<Option<Member>>;

    /// 닉네임으로 회원 조회 (관리자 로그인 경로)
    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<Member>>;

    /// 새 회원 저장. 유니크 제약 위반 시 `ConflictError`를 반환합니다.
    async fn create(&self, member: Member) -> AppResult<Member>;

    /// 기존 회원 갱신 (ID 기준 전체 교체)
    async fn update(&self, member: &Member) -> AppResult<()>;
}

/// MongoDB 기반 회원 리포지토리
pub struct MongoMemberRepository {
    collection: Collection<Member>,
}

impl MongoMemberRepository {
    const COLLECTION_NAME: &'static str = "members";

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection(Self::COLLECTION_NAME),
        }
    }

    /// 유니크 인덱스를 생성합니다. 애플리케이션 시작 시 한 번 호출됩니다.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let provider_pair = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_external_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    // 로컬 계정(provider 없음)은 이 인덱스에서 제외
                    .partial_filter_expression(doc! {
                        "provider": { "$exists": true },
                        "provider_external_id": { "$exists": true },
                    })
                    .build(),
            )
            .build();

        let email_per_provider = IndexModel::builder()
            .keys(doc! { "email.address": 1, "provider": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let nickname = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection
            .create_indexes(vec![provider_pair, email_per_provider, nickname])
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        Ok(())
    }

    fn parse_object_id(id: &str) -> AppResult<ObjectId> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
    }

    /// MongoDB 중복 키 에러(E11000) 여부 판별
    fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
            _ => false,
        }
    }
}

#[async_trait]
impl MemberRepository for MongoMemberRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Member>> {
        let object_id = Self::parse_object_id(id)?;

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_provider(
        &self,
        provider: OAuthProviderKind,
        external_id: &str,
    ) -> AppResult<Option<Member>> {
        self.collection
            .find_one(doc! {
                "provider": provider.as_str(),
                "provider_external_id": external_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_nickname(&self, nickname: &str) -> AppResult<Option<Member>> {
        self.collection
            .find_one(doc! { "nickname": nickname })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut member: Member) -> AppResult<Member> {
        let result = self.collection.insert_one(&member).await.map_err(|e| {
            if Self::is_duplicate_key_error(&e) {
                AppError::ConflictError("이미 존재하는 회원입니다".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        member.id = result.inserted_id.as_object_id();
        Ok(member)
    }

    async fn update(&self, member: &Member) -> AppResult<()> {
        let id = member
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 회원은 갱신할 수 없습니다".to_string()))?;

        self.collection
            .replace_one(doc! { "_id": id }, member)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
