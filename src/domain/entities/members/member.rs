//! Member Entity Implementation
//!
//! 회원 엔티티의 핵심 구현체입니다.
//! 로컬(비밀번호) 계정과 소셜(외부 프로바이더) 계정을 모두 지원하는
//! 통합된 회원 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::config::OAuthProviderKind;
use crate::errors::AppError;

/// 소셜 계정의 `credential_secret` 자리에 저장되는 고정 센티널 값
///
/// 소셜 계정은 비밀번호 인증을 하지 않습니다. 이 값이 비밀번호 입력으로
/// 들어와도 `verify_password`는 프로바이더 존재 여부로 먼저 단락되므로
/// 절대 통과하지 않습니다.
pub const SOCIAL_CREDENTIAL_SENTINEL: &str = "{social}";

/// 이메일 값 객체
///
/// 주소 형식은 생성 시점에 검증됩니다. 소셜 가입 회원은 프로바이더가
/// 이미 검증한 이메일이므로 `is_verified = true`로 시작합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// 이메일 주소
    pub address: String,
    /// 이메일 인증 여부
    pub is_verified: bool,
}

impl Email {
    /// 형식 검증을 거쳐 이메일 값 객체를 생성합니다.
    pub fn new(address: impl Into<String>, is_verified: bool) -> Result<Self, AppError> {
        let address = address.into();
        if !address.validate_email() {
            return Err(AppError::ValidationError(format!(
                "유효하지 않은 이메일 형식입니다: {}",
                address
            )));
        }
        Ok(Self {
            address,
            is_verified,
        })
    }
}

/// 회원 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    User,
    Admin,
}

/// 회원 계정 상태
///
/// `Deactivated`이면 `deactivated_at`이 반드시 설정되고,
/// `Active`이면 반드시 비어 있습니다. 상태 전이 메서드가 이 불변식을 유지합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Deactivated,
}

/// 회원 엔티티
///
/// 이 코어가 영속화하는 유일한 집합체(aggregate)입니다.
/// `(provider, provider_external_id)` 쌍과 `(email.address, provider)` 쌍은
/// 저장소의 유니크 인덱스로 보장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 이메일 값 객체
    pub email: Email,
    /// 표시 이름 (비어 있을 수 없음)
    pub nickname: String,
    /// 로컬 계정의 bcrypt 해시, 소셜 계정은 센티널 값
    pub credential_secret: String,
    /// 소셜 프로바이더 (로컬 계정은 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<OAuthProviderKind>,
    /// 프로바이더 측 사용자 ID (provider가 있을 때만 존재)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_external_id: Option<String>,
    /// 회원 역할
    pub role: MemberRole,
    /// 계정 상태
    pub status: MemberStatus,
    /// 탈퇴(비활성화) 시각 - 재활성화 시 해제됨
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Member {
    /// 새 로컬 회원 생성 (닉네임/비밀번호)
    ///
    /// 이메일 인증이 필요한 상태로 시작됩니다.
    pub fn new_local(
        email_address: String,
        nickname: String,
        password_hash: String,
    ) -> Result<Self, AppError> {
        let email = Email::new(email_address, false)?;
        Self::validate_nickname(&nickname)?;
        let now = DateTime::now();

        Ok(Self {
            id: None,
            email,
            nickname,
            credential_secret: password_hash,
            provider: None,
            provider_external_id: None,
            role: MemberRole::User,
            status: MemberStatus::Active,
            deactivated_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// 새 소셜 회원 생성
    ///
    /// 프로바이더가 이미 인증한 이메일이므로 인증 완료 상태로 시작되며,
    /// 비밀번호 자리에는 센티널 값이 저장됩니다.
    pub fn new_social(
        provider: OAuthProviderKind,
        provider_external_id: String,
        email_address: String,
        nickname: String,
    ) -> Result<Self, AppError> {
        let email = Email::new(email_address, true)?;
        Self::validate_nickname(&nickname)?;
        let now = DateTime::now();

        Ok(Self {
            id: None,
            email,
            nickname,
            credential_secret: SOCIAL_CREDENTIAL_SENTINEL.to_string(),
            provider: Some(provider),
            provider_external_id: Some(provider_external_id),
            role: MemberRole::User,
            status: MemberStatus::Active,
            deactivated_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn validate_nickname(nickname: &str) -> Result<(), AppError> {
        if nickname.trim().is_empty() {
            return Err(AppError::ValidationError(
                "닉네임은 비어 있을 수 없습니다".to_string(),
            ));
        }
        Ok(())
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 소셜 가입 회원인지 확인
    pub fn is_social(&self) -> bool {
        self.provider.is_some()
    }

    /// 비밀번호 인증이 가능한 회원인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.provider.is_none()
    }

    /// 비밀번호 검증
    ///
    /// 소셜 계정은 입력값과 무관하게 항상 false입니다.
    /// 센티널 문자열을 비밀번호로 넣어도 마찬가지입니다.
    pub fn verify_password(&self, plain: &str) -> bool {
        if !self.can_authenticate_with_password() {
            return false;
        }
        bcrypt::verify(plain, &self.credential_secret).unwrap_or(false)
    }

    /// 활성 상태인지 확인
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// 계정 비활성화 (ACTIVE → DEACTIVATED)
    ///
    /// 이미 비활성화된 계정에 대해서는 에러를 반환합니다.
    pub fn deactivate(&mut self) -> Result<(), AppError> {
        if self.status != MemberStatus::Active {
            return Err(AppError::AccountDeactivated(
                "이미 비활성화된 계정입니다".to_string(),
            ));
        }
        let now = DateTime::now();
        self.status = MemberStatus::Deactivated;
        self.deactivated_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// 계정 재활성화 (DEACTIVATED → ACTIVE)
    ///
    /// 이미 활성 상태인 계정에 대해서는 아무 일도 하지 않습니다(멱등).
    pub fn reactivate(&mut self) {
        if self.status == MemberStatus::Active {
            return;
        }
        self.status = MemberStatus::Active;
        self.deactivated_at = None;
        self.updated_at = DateTime::now();
    }

    /// 이메일 인증 완료 처리
    pub fn verify_email(&mut self) {
        if self.email.is_verified {
            return;
        }
        self.email.is_verified = true;
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn social_member() -> Member {
        Member::new_social(
            OAuthProviderKind::Google,
            "g-42".to_string(),
            "a@x.com".to_string(),
            "Ann".to_string(),
        )
        .unwrap()
    }

    fn local_member(password: &str) -> Member {
        let hash = bcrypt::hash(password, 4).unwrap();
        Member::new_local(
            "local@example.com".to_string(),
            "local_member".to_string(),
            hash,
        )
        .unwrap()
    }

    #[test]
    fn test_email_format_validated_at_construction() {
        assert!(Email::new("not-an-email", false).is_err());
        assert!(Email::new("ok@example.com", false).is_ok());
    }

    #[test]
    fn test_nickname_must_not_be_empty() {
        let result = Member::new_local(
            "a@b.com".to_string(),
            "   ".to_string(),
            "hash".to_string(),
        );
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_social_member_starts_verified_with_sentinel() {
        let member = social_member();
        assert!(member.email.is_verified);
        assert_eq!(member.credential_secret, SOCIAL_CREDENTIAL_SENTINEL);
        assert_eq!(member.role, MemberRole::User);
        assert_eq!(member.status, MemberStatus::Active);
        assert!(member.deactivated_at.is_none());
    }

    #[test]
    fn test_social_member_never_authenticates_with_password() {
        let member = social_member();
        assert!(!member.verify_password("password123"));
        assert!(!member.verify_password(""));
        // 센티널 문자열 자체도 거부되어야 함
        assert!(!member.verify_password(SOCIAL_CREDENTIAL_SENTINEL));
    }

    #[test]
    fn test_local_member_password_verification() {
        let member = local_member("SecurePass123!");
        assert!(member.verify_password("SecurePass123!"));
        assert!(!member.verify_password("wrong-password"));
    }

    #[test]
    fn test_deactivate_requires_active_status() {
        let mut member = social_member();
        assert!(member.deactivate().is_ok());
        assert_eq!(member.status, MemberStatus::Deactivated);
        assert!(member.deactivated_at.is_some());

        // 두 번째 비활성화는 거부
        assert!(matches!(
            member.deactivate(),
            Err(AppError::AccountDeactivated(_))
        ));
    }

    #[test]
    fn test_reactivate_clears_deactivated_at() {
        let mut member = social_member();
        member.deactivate().unwrap();

        member.reactivate();
        assert_eq!(member.status, MemberStatus::Active);
        assert!(member.deactivated_at.is_none());
    }

    #[test]
    fn test_reactivate_is_idempotent_on_active_member() {
        let mut member = social_member();
        let before = member.updated_at;
        member.reactivate();
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.updated_at, before);
    }

    #[test]
    fn test_verify_email_flips_flag_once() {
        let mut member = local_member("pw");
        assert!(!member.email.is_verified);
        member.verify_email();
        assert!(member.email.is_verified);
    }
}
