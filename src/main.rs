//! 아이덴티티 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 컴포넌트를 초기화합니다.
//! MongoDB 연결을 설정하고 세션 토큰 기반의 인증 REST API를 제공합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use identity_service_backend::config::AppConfig;
use identity_service_backend::db::Database;
use identity_service_backend::repositories::users::UserRepository;
use identity_service_backend::routes::configure_all_routes;
use identity_service_backend::services::auth::TokenService;
use identity_service_backend::services::email::{
    EmailSender, EmailService, HttpApiEmailSender, LogEmailSender,
};
use identity_service_backend::services::users::UserService;
use identity_service_backend::utils::PasswordHasher;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 아이덴티티 서비스 시작중...");

    // 설정 스냅샷 - 이후 환경 변수는 다시 읽지 않는다
    let config = AppConfig::from_env();

    // 데이터 스토어 초기화
    let database = Arc::new(
        Database::new(&config.database)
            .await
            .expect("데이터베이스 연결 실패"),
    );

    // 리포지토리 및 인덱스 준비
    let user_repo = Arc::new(UserRepository::new(database.clone()));
    user_repo
        .create_indexes()
        .await
        .expect("사용자 인덱스 생성 실패");

    info!("✅ 사용자 컬렉션 인덱스 준비 완료");

    // 이메일 전송기 선택: 키가 없으면 로그 전송기로 대체
    let email_sender: Arc<dyn EmailSender> = if config.email.api_key.is_empty() {
        info!("EMAIL_API_KEY 미설정 - 로그 이메일 전송기 사용");
        Arc::new(LogEmailSender)
    } else {
        Arc::new(HttpApiEmailSender::new(&config.email))
    };
    let email_service = Arc::new(EmailService::new(email_sender));

    // 서비스 조립 (명시적 의존성 주입)
    let user_service = web::Data::new(UserService::new(
        user_repo,
        PasswordHasher::new(),
        email_service,
    ));
    let token_service = web::Data::new(TokenService::new(&config.jwt));
    let config_data = web::Data::new(config);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(config_data, user_service, token_service).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    config: web::Data<AppConfig>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> std::io::Result<()> {
    let bind_address = ("0.0.0.0", config.server.port);

    info!(
        "🌐 서버가 http://{}:{} 에서 실행중입니다",
        bind_address.0, bind_address.1
    );

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors(&config);

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 주입되는 컴포넌트
            .app_data(config.clone())
            .app_data(user_service.clone())
            .app_data(token_service.clone())
            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 설정된 오리진 허용 목록에 있는 출처만 통과시킵니다.
/// 세션 쿠키를 사용하므로 자격 증명 지원이 켜져 있습니다.
fn configure_cors(config: &AppConfig) -> Cors {
    let whitelist = config.cors.origin_whitelist.clone();

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|origin| whitelist.iter().any(|allowed| allowed == origin))
                .unwrap_or(false)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 자격 증명(세션 쿠키) 지원
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
