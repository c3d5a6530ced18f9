//! 이메일 템플릿 및 발송 서비스
//!
//! 플로우가 필요로 하는 이메일을 조립해서 전송기에 넘깁니다.

use std::sync::Arc;

use crate::domain::entities::users::user::ACTIVATION_KEY_TTL_HOURS;
use crate::errors::AppError;
use crate::services::email::sender::{EmailMessage, EmailSender};

/// 이메일 발송 서비스
pub struct EmailService {
    sender: Arc<dyn EmailSender>,
}

impl EmailService {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// 회원가입 환영 + 계정 활성화 안내 메일 발송
    ///
    /// 평문 활성화 키는 이 메일에만 실립니다. 로그에 남기지 않습니다.
    pub async fn send_registration_email(
        &self,
        to: &str,
        name: &str,
        activation_key: &str,
    ) -> Result<(), AppError> {
        let message = create_register_email(to, name, activation_key);
        self.sender.send(&message).await
    }
}

/// 회원가입 안내 메일 본문 생성
fn create_register_email(to: &str, name: &str, activation_key: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: format!("Welcome to Coders App, {}. Please activate your account", name),
        text: format!(
            "Hello {},\n\nWelcome to Coders App.\n\nYou need to set a password to activate your account.\n\nHere's your activation key: {}\n\nYour activation key expires in {} hours.",
            name, activation_key, ACTIVATION_KEY_TTL_HOURS
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::sender::LogEmailSender;

    #[test]
    fn test_register_email_contains_name_and_key() {
        let message = create_register_email("luis@example.com", "Luis", "mock-activation-key");

        assert_eq!(message.to, "luis@example.com");
        assert!(message.subject.contains("Luis"));
        assert!(message.text.contains("Hello Luis"));
        assert!(message.text.contains("mock-activation-key"));
    }

    #[test]
    fn test_register_email_mentions_expiry_window() {
        let message = create_register_email("luis@example.com", "Luis", "mock-activation-key");

        assert!(message.text.contains("expires in 24 hours"));
    }

    #[actix_web::test]
    async fn test_send_registration_email_through_sender() {
        let service = EmailService::new(Arc::new(LogEmailSender));

        let result = service
            .send_registration_email("luis@example.com", "Luis", "mock-activation-key")
            .await;

        assert!(result.is_ok());
    }
}
