//! 요청 파이프라인 미들웨어 모듈

pub mod auth_middleware;
mod auth_inner;
pub mod gateway_middleware;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use gateway_middleware::GatewayKeyCheck;
