//! 로그인 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "Email shouldn't be empty"),
        email(message = "Incorrect email format")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password shouldn't be empty"))]
    pub password: String,
}
