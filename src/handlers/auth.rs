//! Authentication HTTP Handlers
//!
//! 소셜 로그인, 토큰 갱신, 관리자 로그인 엔드포인트를 처리합니다.
//! 핸들러는 HTTP 변환(경로/본문 파싱, 상태 코드 선택)만 담당하고,
//! 규칙은 모두 서비스 계층에 위임합니다.
//!
//! # Endpoints
//!
//! - `GET  /auth/{provider}/login-url` - 프로바이더 로그인 URL 생성
//! - `POST /auth/{provider}/login` - 인가 코드로 로그인 (없으면 가입, 201)
//! - `POST /auth/refresh` - 토큰 쌍 재발급 (액세스 토큰 인증 필요)
//! - `POST /admin/auth/login` - 관리자 닉네임/비밀번호 로그인

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::config::OAuthProviderKind;
use crate::domain::models::auth::authenticated_member::AuthenticatedMember;
use crate::domain::{
    AdminLoginRequest, LoginResponse, RefreshTokenRequest, SocialLoginRequest,
    TokenRefreshResponse,
};
use crate::errors::AppError;
use crate::services::auth::{RefreshCoordinator, SocialAuthService};
use crate::services::members::MemberService;

/// 경로 세그먼트에서 프로바이더를 파싱합니다. 미지원 값은 404입니다.
fn parse_provider(segment: &str) -> Result<OAuthProviderKind, AppError> {
    OAuthProviderKind::parse(segment).ok_or_else(|| {
        AppError::NotFound(format!("지원하지 않는 프로바이더입니다: {}", segment))
    })
}

/// 소셜 로그인 URL 생성 핸들러
///
/// # Endpoint
/// `GET /auth/{provider}/login-url`
#[get("/{provider}/login-url")]
pub async fn social_login_url(
    path: web::Path<String>,
    service: web::Data<SocialAuthService>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let url_response = service.login_url(provider)?;

    Ok(HttpResponse::Ok().json(url_response))
}

/// 소셜 로그인 핸들러
///
/// 인가 코드를 프로바이더 토큰으로 교환하고, 회원 계정을 정합한 뒤
/// 자체 토큰 쌍을 발급합니다. 계정이 새로 생성되면 201, 기존 계정
/// 로그인이면 200입니다.
///
/// # Endpoint
/// `POST /auth/{provider}/login`
#[post("/{provider}/login")]
pub async fn social_login(
    path: web::Path<String>,
    payload: web::Json<SocialLoginRequest>,
    service: web::Data<SocialAuthService>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let outcome = service
        .login(provider, &payload.authorization_code)
        .await?;

    let body = LoginResponse::new(&outcome.member, outcome.tokens);
    if outcome.created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

/// 토큰 갱신 핸들러
///
/// 인증 게이트를 통과한 요청만 도달합니다. 본문의 리프레시 토큰과
/// 액세스 토큰의 주체가 일치해야 합니다.
///
/// # Endpoint
/// `POST /auth/refresh`
#[post("")]
pub async fn refresh_tokens(
    member: AuthenticatedMember,
    payload: web::Json<RefreshTokenRequest>,
    coordinator: web::Data<RefreshCoordinator>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let pair = coordinator
        .refresh(&member.member_id, &payload.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(TokenRefreshResponse::from(pair)))
}

/// 관리자 로그인 핸들러
///
/// 소셜 플로우를 우회하는 유일한 비밀번호 로그인 경로입니다.
///
/// # Endpoint
/// `POST /admin/auth/login`
#[post("/login")]
pub async fn admin_login(
    payload: web::Json<AdminLoginRequest>,
    service: web::Data<MemberService>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (member, tokens) = service
        .authenticate_admin(&payload.nickname, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse::new(&member, tokens)))
}
