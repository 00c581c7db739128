use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chirpy::chirp::service::ChirpService;
use chirpy::config::Config;
use chirpy::inbound::http::metrics::ServerMetrics;
use chirpy::inbound::http::router::create_router;
use chirpy::inbound::http::router::AppState;
use chirpy::outbound::repositories::PostgresChirpRepository;
use chirpy::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use chirpy::session::service::SessionService;
use chirpy::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        file_root = %config.server.file_root,
        platform = ?config.platform,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        refresh_token_ttl_days = config.jwt.refresh_token_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(config.password.bcrypt_cost);
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes(), config.jwt.access_token_ttl())
            .with_password_hasher(password_hasher),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool.clone()));
    let token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            password_hasher,
        )),
        chirp_service: Arc::new(ChirpService::new(chirp_repository)),
        session_service: Arc::new(SessionService::new(
            user_repository,
            token_repository,
            Arc::clone(&authenticator),
            config.jwt.refresh_token_ttl(),
        )),
        authenticator,
        metrics: Arc::new(ServerMetrics::new()),
        polka_api_key: Arc::from(config.polka.api_key.as_str()),
        platform: config.platform,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.file_root);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
