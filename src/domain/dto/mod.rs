//! API 경계의 데이터 전송 객체 모듈

pub mod users;

pub use users::*;
