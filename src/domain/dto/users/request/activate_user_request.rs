//! 계정 활성화 요청 DTO
//!
//! 활성화 키는 쿼리 파라미터로, 새 비밀번호는 본문으로 들어옵니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 활성화 키 쿼리 파라미터
#[derive(Debug, Clone, Deserialize)]
pub struct ActivationKeyQuery {
    #[serde(rename = "activationKey")]
    pub activation_key: String,
}

/// 계정 활성화 요청 본문
///
/// 새 비밀번호와 그 확인값을 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct ActivateUserRequest {
    /// 계정에 새로 설정할 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "Password should have 8 characters minimum"))]
    pub password: String,

    /// 비밀번호 확인 (password와 정확히 일치해야 함)
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// 비밀번호 일치 여부를 검증
fn validate_passwords_match(request: &ActivateUserRequest) -> Result<(), ValidationError> {
    if request.password != request.confirm_password {
        return Err(ValidationError::new("passwords_must_match")
            .with_message("Passwords must match".into()));
    }
    Ok(())
}
