//! 회원가입 요청 DTO
//!
//! 등록 시점에는 비밀번호를 받지 않습니다. 비밀번호는 활성화 단계에서
//! 사용자가 직접 정합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 새 계정 등록 요청
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
/// 검증 메시지는 그대로 공개 응답에 합쳐지므로 문구를 바꾸면 안 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    /// 표시 이름 (필수, 비어 있을 수 없음)
    #[validate(length(min = 1, message = "Name shouldn't be empty"))]
    pub name: String,

    /// 사용자 이메일 주소 (계정의 유일 식별 키)
    #[validate(
        length(min = 1, message = "Email shouldn't be empty"),
        email(message = "Incorrect email format")
    )]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_valid_request_passes() {
        let request = RegisterUserRequest {
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_reports_its_message() {
        let request = RegisterUserRequest {
            name: String::new(),
            email: "luis@example.com".to_string(),
        };

        let error = AppError::from(request.validate().unwrap_err());

        assert_eq!(error.public_message(), "Name shouldn't be empty");
    }

    #[test]
    fn test_malformed_email_reports_its_message() {
        let request = RegisterUserRequest {
            name: "Luis".to_string(),
            email: "not-an-email".to_string(),
        };

        let error = AppError::from(request.validate().unwrap_err());

        assert_eq!(error.public_message(), "Incorrect email format");
    }

    #[test]
    fn test_multiple_violations_are_all_reported() {
        let request = RegisterUserRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
        };

        let message = AppError::from(request.validate().unwrap_err()).public_message();

        assert!(message.contains("Name shouldn't be empty"));
        assert!(message.contains("Incorrect email format"));
        assert!(message.contains(" & "));
    }
}
