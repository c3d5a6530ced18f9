//! # Authentication HTTP Handlers
//!
//! 로그인, 세션 검증, 로그아웃 엔드포인트를 처리하는 핸들러입니다.
//!
//! ## 세션 전달 방식
//!
//! 로그인 성공 시 세션 토큰은 HTTP-only 쿠키로 전달됩니다.
//! 토큰값은 JSON 본문에 실리지 않으며, 응답은 쿠키가 설정되었다는
//! 메시지만 담습니다. 쿠키 수명은 토큰 유효 기간과 같습니다.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::config::AppConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::users::request::LoginRequest;
use crate::domain::dto::users::response::{MessageResponse, UserPayload, UserPayloadResponse};
use crate::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 로그인 핸들러
///
/// 자격 증명을 검증하고 세션 토큰을 발급해 HTTP-only 쿠키로 내립니다.
///
/// 존재하지 않는 이메일과 틀린 비밀번호는 동일한 401 응답을 받습니다.
/// 응답 본문: `{"message": "<cookie-name> has been set"}`
#[post("/login")]
pub async fn login_user(
    payload: web::Json<LoginRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let credentials = payload.into_inner();
    let user = user_service
        .verify_password(&credentials.email, &credentials.password)
        .await?;

    let token = token_service.issue(&user)?;

    let cookie = Cookie::build(config.sso_cookie.name.clone(), token)
        .http_only(true)
        .path("/")
        .max_age(CookieDuration::seconds(config.sso_cookie.max_age_secs))
        .finish();

    log::info!("로그인 성공: {}", user.email);

    Ok(HttpResponse::Ok().cookie(cookie).json(MessageResponse {
        message: format!("{} has been set", config.sso_cookie.name),
    }))
}

/// 세션 검증 핸들러
///
/// 인증 미들웨어를 통과한 요청의 신원을 그대로 돌려줍니다.
/// 응답: `{"userPayload": {id, name, isAdmin}}`
#[get("/verify-token")]
pub async fn get_user_details(
    user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserPayloadResponse {
        user_payload: UserPayload::from(user.into_inner()),
    }))
}

/// 로그아웃 핸들러
///
/// 세션 쿠키를 제거합니다. 토큰 자체는 무상태이므로 만료 전까지
/// 유효하지만, 브라우저에서는 이 시점에 자격 증명이 사라집니다.
#[post("/logout")]
pub async fn logout_user(config: web::Data<AppConfig>) -> Result<HttpResponse, AppError> {
    let mut removal = Cookie::build(config.sso_cookie.name.clone(), "")
        .http_only(true)
        .path("/")
        .finish();
    removal.make_removal();

    Ok(HttpResponse::NoContent().cookie(removal).finish())
}
