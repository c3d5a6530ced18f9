//! 세션 토큰 모듈

pub mod token;

pub use token::*;
