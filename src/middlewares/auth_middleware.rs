//! 세션 인증 미들웨어
//!
//! 요청 파이프라인에서 세션 토큰을 검증하고 인증된 신원을
//! 요청 extensions에 실어 다운스트림 핸들러로 전달합니다.
//!
//! 요청 한 건의 상태 전이는 단순합니다:
//! 자격 증명 존재? → 서명/만료 유효? → 인증됨, 아니면 401 거절.
//! 재시도나 부분 성공은 없습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 세션 인증 미들웨어
///
/// 보호가 필요한 라우트 스코프에 `.wrap(AuthMiddleware::required())`로
/// 적용합니다.
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::config::{
        AppConfig, CorsConfig, DatabaseConfig, EmailConfig, GatewayConfig, JwtConfig,
        ServerConfig, SsoCookieConfig,
    };
    use crate::domain::auth::AuthenticatedUser;
    use crate::domain::dto::users::response::{UserPayload, UserPayloadResponse};
    use crate::domain::entities::users::user::User;
    use crate::services::auth::TokenService;

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig { port: 4000 },
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                database_name: "identity_service_test".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-signing-secret".to_string(),
                token_expiry_secs: 3600,
            },
            sso_cookie: SsoCookieConfig {
                name: "coders_identity_token".to_string(),
                max_age_secs: 3600,
            },
            email: EmailConfig {
                api_url: String::new(),
                api_key: String::new(),
                sender: "no-reply@localhost".to_string(),
            },
            cors: CorsConfig {
                origin_whitelist: vec![],
            },
            gateway: GatewayConfig {
                api_key: "gateway-test-key".to_string(),
            },
        }
    }

    fn active_user() -> User {
        let mut user = User::new_pending("Luis".to_string(), "luis@example.com".to_string());
        user.id = Some(mongodb::bson::oid::ObjectId::new());
        user.is_active = true;
        user
    }

    async fn probe(user: web::ReqData<AuthenticatedUser>) -> HttpResponse {
        HttpResponse::Ok().json(UserPayloadResponse {
            user_payload: UserPayload::from(user.into_inner()),
        })
    }

    /// 보호 라우트 하나만 올린 테스트 앱 구성
    macro_rules! protected_app {
        ($config:expr) => {{
            let config = $config;
            let token_service = web::Data::new(TokenService::new(&config.jwt));
            test::init_service(
                App::new()
                    .app_data(web::Data::new(config))
                    .app_data(token_service)
                    .service(
                        web::scope("/users")
                            .wrap(AuthMiddleware::required())
                            .route("/verify-token", web::get().to(probe)),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_request_without_credential_is_rejected() {
        let app = protected_app!(test_config());

        let request = test::TestRequest::get()
            .uri("/users/verify-token")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "No Token provided");
    }

    #[actix_web::test]
    async fn test_cookie_credential_authenticates() {
        let config = test_config();
        let token = TokenService::new(&config.jwt)
            .issue(&active_user())
            .unwrap();
        let app = protected_app!(config);

        let request = test::TestRequest::get()
            .uri("/users/verify-token")
            .cookie(Cookie::new("coders_identity_token", token))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["userPayload"]["name"], "Luis");
        assert_eq!(body["userPayload"]["isAdmin"], false);
    }

    #[actix_web::test]
    async fn test_bearer_header_is_accepted_as_fallback() {
        let config = test_config();
        let token = TokenService::new(&config.jwt)
            .issue(&active_user())
            .unwrap();
        let app = protected_app!(config);

        let request = test::TestRequest::get()
            .uri("/users/verify-token")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_tampered_and_expired_tokens_get_identical_rejections() {
        let config = test_config();
        let token_service = TokenService::new(&config.jwt);
        let mut tampered = token_service.issue(&active_user()).unwrap();
        tampered.push('x');

        let expired = TokenService::new(&JwtConfig {
            secret: "test-signing-secret".to_string(),
            token_expiry_secs: -3600,
        })
        .issue(&active_user())
        .unwrap();

        let app = protected_app!(config);

        let mut bodies = Vec::new();
        for token in [tampered, expired] {
            let request = test::TestRequest::get()
                .uri("/users/verify-token")
                .cookie(Cookie::new("coders_identity_token", token))
                .to_request();
            let response = test::call_service(&app, request).await;

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(test::read_body(response).await);
        }

        // 변조와 만료는 바이트 단위로 같은 응답이어야 한다
        assert_eq!(bodies[0], bodies[1]);
    }

    #[actix_web::test]
    async fn test_authorization_without_bearer_prefix_is_rejected() {
        let app = protected_app!(test_config());

        let request = test::TestRequest::get()
            .uri("/users/verify-token")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }
}
