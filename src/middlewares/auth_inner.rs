//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};

use futures_util::future::LocalBoxFuture;

use crate::config::AppConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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

        Box::pin(async move {
            match authenticate_request(&req) {
                Ok(user) => {
                    // 인증된 신원을 타입이 있는 요청 컨텍스트로 전달
                    req.extensions_mut().insert(user);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    log::warn!("인증 실패: {}", error);

                    let response = error.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// 요청에서 세션 자격 증명을 추출하고 검증합니다
///
/// 1순위는 세션 쿠키이고, 쿠키가 없으면 `Authorization: Bearer` 헤더를
/// 대안으로 받습니다 (브라우저 외의 서비스 호출자용).
fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| AppError::Internal("AppConfig가 등록되지 않았습니다".to_string()))?;
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Internal("TokenService가 등록되지 않았습니다".to_string()))?;

    let token = match req.cookie(&config.sso_cookie.name) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or(AppError::NoTokenProvided)?;

            token_service.extract_bearer_token(auth_header)?.to_string()
        }
    };

    // 서명/형식/만료 어느 쪽이 틀렸는지는 응답에 드러나지 않는다
    let claims = token_service.verify(&token)?;

    Ok(AuthenticatedUser::from(claims))
}
