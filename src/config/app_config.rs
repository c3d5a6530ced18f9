//! # Application Configuration
//!
//! 환경 변수에서 읽어오는 서비스 전역 설정 구조체입니다.
//! 기동 시 한 번 생성되어 `web::Data<AppConfig>`로 전 컴포넌트에 주입됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export PORT="4000"
//! export MONGODB_URL="mongodb://localhost:27017"
//! export DATABASE_NAME="identity_service_dev"
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export TOKEN_EXPIRY="86400"              # 초 단위, 쿠키 max-age와 동일
//! export EMAIL_API_URL="https://api.example.com/v3/smtp/email"
//! export EMAIL_API_KEY="..."               # 비어 있으면 로그 전송기 사용
//! export EMAIL_SENDER="no-reply@example.com"
//! export CORS_ORIGIN_WHITELIST="http://localhost:3000,http://localhost:8080"
//! export API_GATEWAY_KEY="..."
//! ```

use std::env;

/// API 게이트웨이가 자신을 식별할 때 사용하는 헤더 이름
pub const API_KEY_HEADER: &str = "X-API-KEY";
/// 호출 서비스 이름을 담는 헤더 이름
pub const API_NAME_HEADER: &str = "X-API-NAME";
/// 유일하게 허용되는 업스트림 호출자 이름
pub const API_GATEWAY_NAME: &str = "api-gateway";

/// 서비스 전역 설정 스냅샷
///
/// 기동 시점에 한 번 만들어지는 불변 구조체입니다.
/// 요청 처리 중에는 이 구조체만 읽고, 환경 변수는 다시 읽지 않습니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub sso_cookie: SsoCookieConfig,
    pub email: EmailConfig,
    pub cors: CorsConfig,
    pub gateway: GatewayConfig,
}

/// HTTP 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub database_name: String,
}

/// 세션 토큰 서명 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 대칭 서명 비밀키 - 서비스 신뢰 경계 밖으로 절대 나가지 않습니다
    pub secret: String,
    /// 토큰 유효 기간 (초)
    pub token_expiry_secs: i64,
}

/// 세션 쿠키 설정
///
/// 로그인 성공 시 발급되는 HTTP-only 쿠키의 이름과 수명입니다.
/// 수명은 토큰 유효 기간과 항상 동일합니다.
#[derive(Debug, Clone)]
pub struct SsoCookieConfig {
    pub name: String,
    pub max_age_secs: i64,
}

/// 이메일 릴레이 API 설정
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    /// 비어 있으면 실제 발송 대신 로그 전송기를 사용합니다
    pub api_key: String,
    pub sender: String,
}

/// CORS 허용 오리진 설정
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origin_whitelist: Vec<String>,
}

/// API 게이트웨이 키 검증 설정
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
}

impl AppConfig {
    /// 환경 변수에서 전체 설정을 읽어옵니다
    ///
    /// 누락된 값은 개발 환경 기본값으로 채워지며,
    /// 비밀키류가 기본값으로 남은 경우 경고를 남깁니다.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        });

        let token_expiry_secs = env_i64("TOKEN_EXPIRY", 86_400);

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(4000),
            },
            database: DatabaseConfig {
                url: env::var("MONGODB_URL")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database_name: env::var("DATABASE_NAME")
                    .unwrap_or_else(|_| "identity_service_dev".to_string()),
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                token_expiry_secs,
            },
            sso_cookie: SsoCookieConfig {
                name: env::var("SSO_COOKIE_NAME")
                    .unwrap_or_else(|_| "coders_identity_token".to_string()),
                max_age_secs: token_expiry_secs,
            },
            email: EmailConfig {
                api_url: env::var("EMAIL_API_URL").unwrap_or_default(),
                api_key: env::var("EMAIL_API_KEY").unwrap_or_default(),
                sender: env::var("EMAIL_SENDER")
                    .unwrap_or_else(|_| "no-reply@localhost".to_string()),
            },
            cors: CorsConfig {
                origin_whitelist: env::var("CORS_ORIGIN_WHITELIST")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
            },
            gateway: GatewayConfig {
                api_key: env::var("API_GATEWAY_KEY").unwrap_or_else(|_| {
                    log::warn!("API_GATEWAY_KEY not set, using default (not secure for production!)");
                    "gateway-dev-key".to_string()
                }),
            },
        }
    }
}

/// i64 환경 변수를 기본값과 함께 읽습니다
fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}
