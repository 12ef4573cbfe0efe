//! 인증 게이트 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 평가하고 인증 주체를
//! 요청에 부착합니다. 라우트 설정에서 Required/Optional 모드와
//! 역할 요구사항을 선택합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::members::member::MemberRole;
use crate::domain::models::auth::authentication_request::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthGateService;

/// 인증 게이트
///
/// 게이트는 절대 저장소를 조회하지 않습니다. 서명된 클레임만으로
/// 판정하므로, 발급 이후 탈퇴한 계정의 토큰도 만료 전까지는
/// 통과합니다(짧은 액세스 TTL이 이 창을 제한합니다).
pub struct AuthGate {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthGate {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 게이트 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 게이트 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 게이트 생성
    pub fn required_with_role(role: MemberRole) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }

    /// 복수 역할 중 하나 요구 게이트 생성
    pub fn required_with_roles(roles: Vec<MemberRole>) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(roles))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service: Rc::new(service),
            mode: self.mode,
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use crate::config::JwtConfig;
    use crate::domain::models::auth::authenticated_member::AuthenticatedMember;
    use crate::services::auth::token_codec::TokenCodec;

    fn codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig {
            secret: "test-secret".to_string(),
            access_ttl_hours: 1,
            refresh_ttl_days: 7,
        })
    }

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    #[::core::prelude::v1::test]
    fn test_required_role_single() {
        let required = RequiredRole::Single(MemberRole::Admin);

        assert!(required.is_satisfied(MemberRole::Admin));
        assert!(!required.is_satisfied(MemberRole::User));
    }

    #[::core::prelude::v1::test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec![MemberRole::Admin, MemberRole::User]);

        assert!(required.is_satisfied(MemberRole::Admin));
        assert!(required.is_satisfied(MemberRole::User));

        let admin_only = RequiredRole::Any(vec![MemberRole::Admin]);
        assert!(!admin_only.is_satisfied(MemberRole::User));
    }

    #[::core::prelude::v1::test]
    fn test_authenticated_member_roles() {
        let admin = AuthenticatedMember {
            member_id: "64b0c0ffee0000000000aaaa".to_string(),
            email: "admin@example.com".to_string(),
            role: MemberRole::Admin,
        };

        assert!(admin.has_role(MemberRole::Admin));
        assert!(!admin.has_role(MemberRole::User));
        assert!(admin.is_admin());

        let user = AuthenticatedMember {
            member_id: "64b0c0ffee0000000000bbbb".to_string(),
            email: "user@example.com".to_string(),
            role: MemberRole::User,
        };
        assert!(!user.is_admin());
    }

    #[actix_web::test]
    async fn test_required_gate_renders_401_json_for_garbage_token() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(codec())).service(
                web::scope("/protected")
                    .wrap(AuthGate::required())
                    .route("", web::get().to(protected)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn test_required_gate_renders_401_json_without_header() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(codec())).service(
                web::scope("/protected")
                    .wrap(AuthGate::required())
                    .route("", web::get().to(protected)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_role_gate_renders_403_json_for_insufficient_role() {
        let codec = codec();
        let access = codec
            .issue_access("64b0c0ffee0000000000aaaa", "ann@example.com", MemberRole::User)
            .unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(codec)).service(
                web::scope("/admin")
                    .wrap(AuthGate::required_with_role(MemberRole::Admin))
                    .route("", web::get().to(protected)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_required_gate_forwards_valid_access_token() {
        let codec = codec();
        let access = codec
            .issue_access("64b0c0ffee0000000000aaaa", "ann@example.com", MemberRole::User)
            .unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(codec)).service(
                web::scope("/protected")
                    .wrap(AuthGate::required())
                    .route("", web::get().to(protected)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
