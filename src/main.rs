//! 프롬프트 마켓 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB 연결을 설정하고 JWT + 소셜 로그인 기반의 REST API를 제공합니다.
//!
//! 모든 의존성은 여기서 명시적으로 생성되어 생성자 주입됩니다.
//! 전역 싱글톤이나 서비스 로케이터는 사용하지 않습니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use prompt_market_backend::config::{
    JwtConfig, OAuthClientConfig, OAuthSharedConfig, PasswordConfig, ServerConfig,
};
use prompt_market_backend::db::Database;
use prompt_market_backend::repositories::{MemberRepository, MongoMemberRepository};
use prompt_market_backend::routes::configure_all_routes;
use prompt_market_backend::services::auth::providers::{
    GoogleOAuthAdapter, KakaoOAuthAdapter, NaverOAuthAdapter, OAuthProvider,
};
use prompt_market_backend::services::auth::reconciler::IdentityReconciler;
use prompt_market_backend::services::auth::{RefreshCoordinator, SocialAuthService, TokenCodec};
use prompt_market_backend::services::members::MemberService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 프롬프트 마켓 백엔드 시작중...");

    // 데이터 스토어 초기화
    let database = Database::new().await.expect("데이터베이스 연결 실패");
    info!("✅ MongoDB 연결 성공");

    let member_repo = Arc::new(MongoMemberRepository::new(&database));
    member_repo
        .ensure_indexes()
        .await
        .expect("회원 인덱스 생성 실패");
    let member_repo: Arc<dyn MemberRepository> = member_repo;

    // 설정 로드 (여기서 한 번, 이후 불변)
    let jwt_config = JwtConfig::from_env();
    let shared_config = OAuthSharedConfig::from_env();
    let password_config = PasswordConfig::from_env();
    let server_config = ServerConfig::from_env();

    // 서비스 조립
    let codec = Arc::new(TokenCodec::new(&jwt_config));

    let adapters: Vec<Arc<dyn OAuthProvider>> = vec![
        Arc::new(
            GoogleOAuthAdapter::new(OAuthClientConfig::google_from_env(), shared_config.clone())
                .expect("Google 어댑터 초기화 실패"),
        ),
        Arc::new(
            KakaoOAuthAdapter::new(OAuthClientConfig::kakao_from_env(), shared_config.clone())
                .expect("Kakao 어댑터 초기화 실패"),
        ),
        Arc::new(
            NaverOAuthAdapter::new(OAuthClientConfig::naver_from_env(), shared_config.clone())
                .expect("Naver 어댑터 초기화 실패"),
        ),
    ];

    let social_auth = web::Data::new(SocialAuthService::new(
        adapters,
        IdentityReconciler::new(member_repo.clone()),
        codec.clone(),
    ));
    let refresh = web::Data::new(RefreshCoordinator::new(codec.clone(), member_repo.clone()));
    let member_service = web::Data::new(MemberService::new(
        member_repo,
        password_config,
        codec.clone(),
    ));
    let codec_data = web::Data::from(codec);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(server_config, social_auth, refresh, member_service, codec_data).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
async fn start_http_server(
    server_config: ServerConfig,
    social_auth: web::Data<SocialAuthService>,
    refresh: web::Data<RefreshCoordinator>,
    member_service: web::Data<MemberService>,
    codec: web::Data<TokenCodec>,
) -> std::io::Result<()> {
    let bind_address = server_config.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

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
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 의존성 주입
            .app_data(social_auth.clone())
            .app_data(refresh.clone())
            .app_data(member_service.clone())
            .app_data(codec.clone())
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
/// # Examples
///
/// ```bash
/// # 개발 환경
/// PROFILE=dev cargo run
///
/// # 운영 환경
/// PROFILE=prod cargo run
/// ```
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
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG` 환경변수로 레벨을 제어합니다 (기본값: "info,actix_web=debug").
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 개발환경에서 로컬호스트 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .supports_credentials()
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
