//! 공용 유틸리티 모듈

pub mod password_hasher;

pub use password_hasher::PasswordHasher;
