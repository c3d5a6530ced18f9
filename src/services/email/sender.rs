//! 이메일 전송 추상화
//!
//! 전송 방식(HTTP 릴레이 API, 로그 출력)을 trait 뒤로 숨깁니다.
//! 운영에서는 트랜잭셔널 메일 API를 호출하고, 로컬 개발이나 키가
//! 설정되지 않은 환경에서는 로그 전송기가 대신합니다.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::errors::AppError;

/// 발송할 이메일 한 통
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// 이메일 전송 추상화
///
/// 전송에 실패하면 에러를 반환하고, 실패를 어떻게 다룰지는
/// 호출한 플로우가 결정합니다.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// 릴레이 API 요청 본문의 주소 표현
#[derive(Debug, Serialize)]
struct RelayEmailAddress {
    email: String,
}

/// 릴레이 API 요청 본문
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelaySendEmailBody {
    sender: RelayEmailAddress,
    to: Vec<RelayEmailAddress>,
    subject: String,
    text_content: String,
}

/// 트랜잭셔널 메일 HTTP API 전송기
///
/// `api-key` 헤더 인증의 JSON 엔드포인트로 발송을 위임합니다.
pub struct HttpApiEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpApiEmailSender {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.sender.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for HttpApiEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let body = RelaySendEmailBody {
            sender: RelayEmailAddress {
                email: self.from.clone(),
            },
            to: vec![RelayEmailAddress {
                email: message.to.clone(),
            }],
            subject: message.subject.clone(),
            text_content: message.text.clone(),
        };

        let response = self
            .client
            .post(self.api_url.as_str())
            .header("api-key", self.api_key.as_str())
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                AppError::ExternalService(format!("이메일 릴레이 요청 실패: {}", error))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "이메일 릴레이 응답 오류: {}",
                response.status()
            )));
        }

        log::debug!("이메일 발송 완료: {}", message.to);
        Ok(())
    }
}

/// 로컬 개발용 전송기 - 발송 대신 로그만 남깁니다
///
/// 본문에는 활성화 키가 들어 있으므로 수신자와 제목만 기록합니다.
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        log::info!(
            "이메일 발송 생략 (로그 전송기): to={} subject={}",
            message.to,
            message.subject
        );
        Ok(())
    }
}
