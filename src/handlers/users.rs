//! # User Account HTTP Handlers
//!
//! 계정 생성(회원가입)과 활성화 엔드포인트를 처리하는 핸들러입니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/users/register` | 새 계정 등록 | 201 / 400 / 409 / 500 |
//! | `POST` | `/users/activate?activationKey=...` | 계정 활성화 | 200 / 400 / 401 |
//!
//! ## 응답 예시
//!
//! ### 회원가입 성공 (201 Created)
//! ```json
//! {
//!   "user": {
//!     "id": "507f1f77bcf86cd799439011",
//!     "name": "Luis",
//!     "email": "luis@example.com"
//!   }
//! }
//! ```
//!
//! ### 중복 이메일 (409 Conflict)
//! ```json
//! { "error": "User already exists" }
//! ```

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{
    ActivateUserRequest, ActivationKeyQuery, RegisterUserRequest,
};
use crate::domain::dto::users::response::MessageResponse;
use crate::errors::AppError;
use crate::services::users::UserService;

/// 회원가입 핸들러
///
/// 활성화 대기 상태의 계정을 만들고 활성화 키를 이메일로 보냅니다.
/// 비밀번호는 여기서 받지 않습니다 - 활성화 단계에서 정해집니다.
#[post("/register")]
pub async fn register_user(
    payload: web::Json<RegisterUserRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사 - 위반된 모든 필드가 하나의 400 메시지로 합쳐진다
    payload.validate()?;

    let response = user_service.register_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 계정 활성화 핸들러
///
/// 쿼리의 일회용 활성화 키와 본문의 새 비밀번호를 받아
/// 계정을 활성 상태로 전환합니다.
#[post("/activate")]
pub async fn activate_user(
    query: web::Query<ActivationKeyQuery>,
    payload: web::Json<ActivateUserRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    user_service
        .activate_user(&query.activation_key, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User account has been activated".to_string(),
    }))
}
