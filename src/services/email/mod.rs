//! 이메일 발송 모듈
//!
//! 전송 계층(`sender`)과 템플릿/조립 계층(`email_service`)을 분리합니다.
//! 전송 실패는 호출 플로우를 실패시키지 않는 부수 효과로 취급됩니다.

pub mod email_service;
pub mod sender;

pub use email_service::EmailService;
pub use sender::{EmailMessage, EmailSender, HttpApiEmailSender, LogEmailSender};
