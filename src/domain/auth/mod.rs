//! 요청 컨텍스트 인증 정보 모듈

pub mod authenticated_user;

pub use authenticated_user::*;
