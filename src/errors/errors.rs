//! 애플리케이션 전역에서 사용하는 통합 에러 시스템
//!
//! 인증 서비스의 모든 실패 경로가 공유하는 고정된 에러 목록입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 각 에러를
//! (내부 메시지, 상태 코드, 공개 메시지) 삼중쌍으로 중앙 관리합니다.
//!
//! 보안 정책: 내부 메시지는 로그에만 남고 절대 응답으로 나가지 않습니다.
//! 같은 계열의 실패(존재하지 않는 이메일 vs 틀린 비밀번호 등)는 바이트 단위로
//! 동일한 공개 응답을 반환하여 계정 열거 공격을 차단합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn login(email: &str) -> Result<User, AppError> {
//!     user_repo.find_by_email(email)
//!         .await?
//!         .ok_or(AppError::UserNotFound)
//! }
//! ```

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// 애플리케이션 전역 에러 타입
///
/// 각 variant는 불변 값으로, 요청 간에 안전하게 재사용됩니다.
/// `Display` 구현(= thiserror 메시지)이 내부 메시지이고,
/// [`AppError::public_message`]가 클라이언트에게 전달되는 공개 메시지입니다.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request) - 위반된 필드 메시지를 모두 담습니다
    #[error("Validation error: {0}")]
    Validation(String),

    /// 이메일 유니크 인덱스 충돌 (409 Conflict)
    #[error("Duplicate key")]
    DuplicateKey,

    /// 회원가입 중 중복 외의 예기치 못한 실패 (500 Internal Server Error)
    #[error("Server user error: {0}")]
    RegisterFailed(String),

    /// 로그인: 존재하지 않는 계정 (401 Unauthorized)
    #[error("User not found")]
    UserNotFound,

    /// 로그인: 비밀번호 불일치 (401 Unauthorized)
    #[error("Incorrect password")]
    IncorrectPassword,

    /// 로그인: 비활성 계정 (401 Unauthorized)
    #[error("User is inactive")]
    InactiveUser,

    /// 활성화 키가 없거나, 일치하지 않거나, 만료됨 (401 Unauthorized)
    #[error("Invalid activation key")]
    InvalidActivationKey,

    /// 인증 자격 증명이 요청에 없음 (401 Unauthorized)
    #[error("No Token provided")]
    NoTokenProvided,

    /// Authorization 헤더에 Bearer 접두사가 없음 (401 Unauthorized)
    #[error("Missing Bearer in Authorization header")]
    MissingBearer,

    /// 토큰 서명 불일치 / 형식 오류 / 만료 (401 Unauthorized)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// API 게이트웨이 식별 헤더 검증 실패 (401 Unauthorized)
    #[error("Invalid API Key")]
    InvalidApiKey,

    /// 등록되지 않은 엔드포인트 (404 Not Found)
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    Database(String),

    /// 외부 서비스(이메일 릴레이 등) 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 클라이언트에게 전달되는 공개 메시지
    ///
    /// 이 표가 곧 HTTP 응답 계약입니다. 호출부에서 별도의 메시지를
    /// 만들지 않고 반드시 이 목록을 재사용해야 응답이 흔들리지 않습니다.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(messages) => messages.clone(),
            AppError::DuplicateKey => "User already exists".to_string(),
            AppError::RegisterFailed(_) => "Error creating a new user".to_string(),
            AppError::UserNotFound | AppError::IncorrectPassword => {
                "Incorrect email or password".to_string()
            }
            AppError::InactiveUser => {
                "User is inactive, contact your administrator if you think this is a mistake"
                    .to_string()
            }
            AppError::InvalidActivationKey => "Invalid activation key".to_string(),
            AppError::NoTokenProvided => "No Token provided".to_string(),
            AppError::MissingBearer | AppError::InvalidToken(_) => "Unauthorized".to_string(),
            AppError::InvalidApiKey => "Invalid API Key".to_string(),
            AppError::UnknownEndpoint(_) => "Unknown endpoint".to_string(),
            AppError::Database(_) | AppError::ExternalService(_) | AppError::Internal(_) => {
                "There was an error on the server".to_string()
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey => StatusCode::CONFLICT,
            AppError::UserNotFound
            | AppError::IncorrectPassword
            | AppError::InactiveUser
            | AppError::InvalidActivationKey
            | AppError::NoTokenProvided
            | AppError::MissingBearer
            | AppError::InvalidToken(_)
            | AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::UnknownEndpoint(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 내부 메시지는 로그로만 남기고, 응답 본문에는 공개 메시지만 담습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        log::debug!("요청 처리 실패: {}", self);

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.public_message()
            }))
    }
}

impl From<ValidationErrors> for AppError {
    /// 검증 실패를 하나의 400 에러로 변환합니다.
    ///
    /// 첫 번째 위반만이 아니라 위반된 모든 필드의 메시지를
    /// `" & "` 구분자로 이어 붙입니다.
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(join_validation_messages(&errors))
    }
}

/// 위반된 모든 필드(구조체 수준 규칙 포함)의 메시지를 이어 붙입니다
fn join_validation_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();

    for kind in errors.errors().values() {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            for error in field_errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(error.code.to_string()),
                }
            }
        }
    }

    messages.join(" & ")
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::Validation("Email shouldn't be empty".to_string());

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "Email shouldn't be empty");
    }

    #[test]
    fn test_duplicate_key_is_conflict() {
        let error = AppError::DuplicateKey;

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.public_message(), "User already exists");
    }

    #[test]
    fn test_login_errors_are_indistinguishable() {
        // 계정 열거 방지: 두 실패는 상태 코드와 공개 메시지가 모두 동일해야 한다
        let not_found = AppError::UserNotFound;
        let wrong_password = AppError::IncorrectPassword;

        assert_eq!(not_found.status_code(), wrong_password.status_code());
        assert_eq!(not_found.public_message(), wrong_password.public_message());
        assert_eq!(not_found.public_message(), "Incorrect email or password");

        // 내부 메시지는 서로 달라야 로그에서 구분할 수 있다
        assert_ne!(not_found.to_string(), wrong_password.to_string());
    }

    #[test]
    fn test_inactive_user_message_is_distinct() {
        let error = AppError::InactiveUser;

        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            error.public_message(),
            "User is inactive, contact your administrator if you think this is a mistake"
        );
    }

    #[test]
    fn test_token_failures_collapse_to_unauthorized() {
        let expired = AppError::InvalidToken("ExpiredSignature".to_string());
        let malformed = AppError::InvalidToken("InvalidToken".to_string());
        let missing_bearer = AppError::MissingBearer;

        for error in [&expired, &malformed, &missing_bearer] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(error.public_message(), "Unauthorized");
        }
    }

    #[test]
    fn test_server_errors_hide_private_detail() {
        let error = AppError::Database("connection pool exhausted".to_string());

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "There was an error on the server");
        assert!(!error.public_message().contains("connection pool"));
    }

    #[test]
    fn test_unknown_endpoint_response() {
        let error = AppError::UnknownEndpoint("/nope".to_string());

        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.public_message(), "Unknown endpoint");
    }

    #[test]
    fn test_error_response_status_matches() {
        let error = AppError::InvalidActivationKey;
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_login_error_bodies_are_byte_identical() {
        let not_found_body =
            actix_web::body::to_bytes(AppError::UserNotFound.error_response().into_body())
                .await
                .unwrap();
        let wrong_password_body =
            actix_web::body::to_bytes(AppError::IncorrectPassword.error_response().into_body())
                .await
                .unwrap();

        assert_eq!(not_found_body, wrong_password_body);
    }
}
