//! API 게이트웨이 키 검증 미들웨어
//!
//! 사용자 라우트에 도달하기 전에 업스트림 게이트웨이가 보낸
//! 서비스 식별 헤더 쌍(`X-API-KEY` / `X-API-NAME`)을 검증합니다.
//! 검증 실패는 `401 {"error": "Invalid API Key"}`로 응답합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, ResponseError, Result};

use futures_util::future::LocalBoxFuture;

use crate::config::{AppConfig, API_GATEWAY_NAME, API_KEY_HEADER, API_NAME_HEADER};
use crate::errors::AppError;

/// API 게이트웨이 키 검증 미들웨어
pub struct GatewayKeyCheck;

impl GatewayKeyCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GatewayKeyCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for GatewayKeyCheck
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = GatewayKeyCheckService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayKeyCheckService {
            service: Rc::new(service),
        }))
    }
}

/// 실제 헤더 검증을 수행하는 서비스
pub struct GatewayKeyCheckService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for GatewayKeyCheckService<S>
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
            match check_gateway_headers(&req) {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    log::warn!("게이트웨이 키 검증 실패: {}", error);

                    let response = error.error_response();
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

/// 서비스 식별 헤더 쌍을 설정된 값과 비교합니다
///
/// 키 불일치와 이름 불일치는 구분되지 않고 같은 에러가 됩니다.
fn check_gateway_headers(req: &ServiceRequest) -> Result<(), AppError> {
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| AppError::Internal("AppConfig가 등록되지 않았습니다".to_string()))?;

    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::InvalidApiKey)?;

    let api_name = req
        .headers()
        .get(API_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::InvalidApiKey)?;

    if api_key != config.gateway.api_key || api_name != API_GATEWAY_NAME {
        return Err(AppError::InvalidApiKey);
    }

    Ok(())
}
