//! 인증 게이트의 핵심 평가 로직
//!
//! 게이트는 네 가지 결론 중 하나를 내립니다:
//!
//! 1. 자격 증명 없음 (`CredentialMissing`)
//! 2. 깨진 자격 증명 (`CredentialMalformed`)
//! 3. 만료/용도 불일치 (`CredentialExpiredOrInvalid`)
//! 4. 인증 성공 → 주체를 요청 extensions에 부착
//!
//! 에러를 던지지 않습니다. 실패 시 사유 태그를 extensions에 남기고,
//! Required 모드에서만 401/403 응답을 직접 렌더링합니다.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::authenticated_member::{AuthFailureKind, AuthenticatedMember};
use crate::domain::models::auth::authentication_request::{AuthMode, RequiredRole};
use crate::domain::models::token::TokenType;
use crate::services::auth::token_codec::{extract_bearer_token, TokenCodec};

pub struct AuthGateService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let required_role = self.required_role.clone();

        Box::pin(async move {
            // 앞선 게이트가 이미 주체를 부착했다면 재평가하지 않는다(멱등)
            let existing = req.extensions().get::<AuthenticatedMember>().cloned();

            let auth_result = match existing {
                Some(member) => Ok(member),
                None => {
                    let Some(codec) = req.app_data::<web::Data<TokenCodec>>() else {
                        log::error!("TokenCodec이 앱 데이터에 등록되지 않았습니다");
                        return Ok(deny(
                            req,
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "서버 설정 오류입니다",
                        ));
                    };
                    evaluate(&req, codec)
                }
            };

            match (mode, auth_result) {
                (AuthMode::Required, Err(failure)) => {
                    log::warn!("인증 실패: {:?}", failure);
                    req.extensions_mut().insert(failure);
                    Ok(deny(req, StatusCode::UNAUTHORIZED, failure.message()))
                }
                (AuthMode::Required, Ok(member)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(member.role) {
                            log::warn!(
                                "권한 부족: member={} role={:?} 필요={:?}",
                                member.member_id,
                                member.role,
                                required
                            );
                            return Ok(deny(
                                req,
                                StatusCode::FORBIDDEN,
                                "접근 권한이 부족합니다",
                            ));
                        }
                    }

                    log::debug!("인증 성공: member={}", member.member_id);
                    attach_principal(&req, member);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                (AuthMode::Optional, Ok(member)) => {
                    // 역할이 부족해도 비인증 요청으로 간주하고 진행
                    let satisfies = required_role
                        .as_ref()
                        .map(|r| r.is_satisfied(member.role))
                        .unwrap_or(true);
                    if satisfies {
                        log::debug!("선택적 인증 성공: member={}", member.member_id);
                        attach_principal(&req, member);
                    }
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                (AuthMode::Optional, Err(failure)) => {
                    log::debug!("선택적 인증 실패({:?}), 비인증 요청으로 진행", failure);
                    req.extensions_mut().insert(failure);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

/// 이미 부착된 주체를 덮어쓰지 않고 부착합니다.
fn attach_principal(req: &ServiceRequest, member: AuthenticatedMember) {
    let mut extensions = req.extensions_mut();
    if extensions.get::<AuthenticatedMember>().is_none() {
        extensions.insert(member);
    }
}

/// 게이트가 직접 렌더링하는 거부 응답
fn deny<B>(
    req: ServiceRequest,
    status: StatusCode,
    message: &str,
) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::build(status).json(serde_json::json!({
        "success": false,
        "message": message,
    }));
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 Authorization 헤더를 평가하여 주체 또는 실패 사유를 반환
///
/// 저장소를 조회하지 않습니다. 서명된 클레임만 신뢰합니다.
pub(crate) fn evaluate(
    req: &ServiceRequest,
    codec: &TokenCodec,
) -> Result<AuthenticatedMember, AuthFailureKind> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthFailureKind::CredentialMissing)?;

    let token =
        extract_bearer_token(auth_header).ok_or(AuthFailureKind::CredentialMalformed)?;

    let claims = codec
        .parse(token)
        .map_err(|_| AuthFailureKind::CredentialMalformed)?;

    if claims.token_type != TokenType::Access {
        return Err(AuthFailureKind::CredentialExpiredOrInvalid);
    }
    if claims.exp < Utc::now().timestamp() {
        return Err(AuthFailureKind::CredentialExpiredOrInvalid);
    }

    // 액세스 토큰이라면 이메일/역할 클레임이 반드시 있어야 한다
    let email = claims.email.ok_or(AuthFailureKind::CredentialMalformed)?;
    let role = claims.role.ok_or(AuthFailureKind::CredentialMalformed)?;

    Ok(AuthenticatedMember {
        member_id: claims.sub,
        email,
        role,
    })
}
