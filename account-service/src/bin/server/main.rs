use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::database;
use account_service::outbound::repositories::SqliteUserRepository;
use auth::Authenticator;
use auth::PasswordHasher;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        host = %config.server.host,
        port = config.server.port,
        session_lifetime_hours = config.session.lifetime_hours,
        "Configuration loaded"
    );

    if config.session.uses_development_secret() {
        tracing::warn!("Using the built-in development session secret; set SECRET_KEY in production");
    }

    let pool = database::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    database::migrate(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::new(
        config.session.secret.as_bytes(),
        chrono::Duration::hours(config.session.lifetime_hours),
    ));
    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let application = create_router(user_service, authenticator, config.session.cookie_secure);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(listener, application).await?;

    Ok(())
}
