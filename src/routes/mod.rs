//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 기능별로 그룹화하여 등록합니다.
//!
//! ## 라우트 구성
//!
//! ```text
//! GET  /                       - ping (공개)
//! GET  /health                 - 헬스체크 (공개)
//! POST /users/register         - 게이트웨이 키 필요
//! POST /users/login            - 게이트웨이 키 필요
//! POST /users/activate         - 게이트웨이 키 필요
//! GET  /users/verify-token     - 게이트웨이 키 + 세션 인증 필요
//! POST /users/logout           - 게이트웨이 키 + 세션 인증 필요
//! 그 외                        - 404 Unknown endpoint
//! ```
//!
//! `/users` 스코프 전체가 게이트웨이 키 검증 뒤에 있고,
//! 보호 라우트는 그 안에서 추가로 세션 인증을 거칩니다.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::{AuthMiddleware, GatewayKeyCheck};

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(ping);
    cfg.service(health_check);

    configure_user_routes(cfg);

    // 어떤 라우트에도 걸리지 않은 요청은 통합 404로
    cfg.default_service(web::route().to(unknown_endpoint));
}

/// 사용자 관련 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(GatewayKeyCheck::new())
            .service(handlers::users::register_user)
            .service(handlers::users::activate_user)
            .service(handlers::auth::login_user)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::auth::get_user_details)
                    .service(handlers::auth::logout_user),
            ),
    );
}

/// 루트 ping 엔드포인트
#[actix_web::get("/")]
async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Pong 🏓"
    }))
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 사용됩니다.
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "identity_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 등록되지 않은 경로에 대한 통합 404 응답
async fn unknown_endpoint(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::UnknownEndpoint(req.path().to_string()))
}
