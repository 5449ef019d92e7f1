#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::database;
use account_service::outbound::repositories::user::SqliteUserRepository;
use auth::Authenticator;
use auth::PasswordHasher;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-session-signing-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    /// Follows redirects like a browser would.
    pub browser: reqwest::Client,
    /// Same cookie jar as `browser`, but stops at the first response.
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = test_pool().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Invalid argon2 params");
        let user_service = Arc::new(UserService::new(user_repo, hasher));

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, chrono::Duration::hours(24)));

        let router = create_router(user_service, authenticator, false);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jar = Arc::new(Jar::default());

        Self {
            address,
            pool,
            browser: reqwest::Client::builder()
                .cookie_provider(Arc::clone(&jar))
                .build()
                .expect("Failed to create reqwest client"),
            client: reqwest::Client::builder()
                .cookie_provider(jar)
                .redirect(Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// GET without following redirects
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// GET following redirects, returning the final page body
    pub async fn get_page(&self, path: &str) -> String {
        self.browser
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
            .text()
            .await
            .expect("Failed to read body")
    }

    /// Submit a form without following the redirect
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        self.post_form(
            "/registro",
            &[
                ("username", username),
                ("email", email),
                ("password", password),
                ("confirm_password", password),
            ],
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }
}

/// In-memory database that lives as long as its single pooled connection.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    database::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Value of the `Location` header of a redirect response
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Non-ASCII Location header")
}
