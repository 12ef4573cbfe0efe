//! 인증 게이트 평가 결과 모델
//!
//! 게이트가 요청에 남기는 두 가지 산출물 - 인증된 주체(principal)와
//! 실패 사유 태그 - 을 정의합니다.

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::members::member::MemberRole;

/// 액세스 토큰 클레임에서 추출된 인증 주체
///
/// 게이트는 저장소를 조회하지 않고 서명된 클레임만 신뢰하므로
/// 이 구조체의 내용은 토큰 발급 시점의 회원 정보입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedMember {
    /// 회원 고유 ID (ObjectId 16진수 문자열)
    pub member_id: String,
    /// 회원 이메일
    pub email: String,
    /// 회원 역할
    pub role: MemberRole,
}

impl AuthenticatedMember {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: MemberRole) -> bool {
        self.role == role
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 게이트가 extensions에 넣어 둔 주체를 핸들러 인자로 꺼냅니다.
impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedMember>() {
            Some(member) => ready(Ok(member.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}

/// 선택적 인증 주체 추출자
#[derive(Debug, Clone)]
pub struct OptionalMember(pub Option<AuthenticatedMember>);

impl FromRequest for OptionalMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let member = req.extensions().get::<AuthenticatedMember>().cloned();
        ready(Ok(OptionalMember(member)))
    }
}

/// 게이트 평가 실패 사유 태그
///
/// 게이트는 예외를 던지지 않고 이 태그를 요청 extensions에 남깁니다.
/// `ExpiredOrInvalid`는 만료와 용도 불일치를 의도적으로 합친 것으로,
/// 클라이언트가 실패 원인을 구분할 수 없게 합니다(oracle 누출 방지).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    /// Authorization: Bearer 헤더 없음 - 비인증 요청으로 진행
    CredentialMissing,
    /// 서명 또는 구조가 깨진 토큰
    CredentialMalformed,
    /// 파싱은 되지만 만료되었거나 액세스 토큰이 아님
    CredentialExpiredOrInvalid,
}

impl AuthFailureKind {
    /// 401 응답 본문에 들어가는 사용자용 메시지
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailureKind::CredentialMissing => "인증 토큰이 필요합니다",
            AuthFailureKind::CredentialMalformed => "유효하지 않은 인증 토큰입니다",
            AuthFailureKind::CredentialExpiredOrInvalid => {
                "만료되었거나 유효하지 않은 인증 토큰입니다"
            }
        }
    }
}
