//! Member HTTP Handlers
//!
//! 회원 가입/조회/탈퇴 엔드포인트를 처리합니다.
//!
//! # Endpoints
//!
//! - `POST   /members` - 로컬 회원 가입 (공개)
//! - `GET    /members/me` - 내 정보 조회 (인증 필요)
//! - `DELETE /members/me` - 탈퇴 (인증 필요, 소프트 삭제)

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::models::auth::authenticated_member::AuthenticatedMember;
use crate::domain::{CreateMemberRequest, MemberResponse};
use crate::errors::AppError;
use crate::services::members::MemberService;

/// 로컬 회원 가입 핸들러
///
/// # Endpoint
/// `POST /members`
#[post("")]
pub async fn create_member(
    payload: web::Json<CreateMemberRequest>,
    service: web::Data<MemberService>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let member = service
        .signup(request.email, request.nickname, request.password)
        .await?;

    Ok(HttpResponse::Created().json(MemberResponse::from(&member)))
}

/// 내 정보 조회 핸들러
///
/// 토큰의 주체를 저장소에서 다시 조회하므로 항상 최신 상태를 반환합니다.
///
/// # Endpoint
/// `GET /members/me`
#[get("")]
pub async fn get_me(
    member: AuthenticatedMember,
    service: web::Data<MemberService>,
) -> Result<HttpResponse, AppError> {
    let current = service.find_by_id(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(MemberResponse::from(&current)))
}

/// 탈퇴 핸들러 (소프트 삭제)
///
/// 문서는 남고 상태만 `deactivated`가 됩니다. 같은 소셜 계정으로
/// 다시 로그인하면 재활성화됩니다.
///
/// # Endpoint
/// `DELETE /members/me`
#[delete("")]
pub async fn deactivate_me(
    member: AuthenticatedMember,
    service: web::Data<MemberService>,
) -> Result<HttpResponse, AppError> {
    let deactivated = service.deactivate(&member.member_id).await?;

    Ok(HttpResponse::Ok().json(MemberResponse::from(&deactivated)))
}
