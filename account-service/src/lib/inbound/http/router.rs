use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::dashboard::dashboard;
use super::handlers::index::index;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::register::register_form;
use super::middleware::require_session;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::user::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub cookie_secure: bool,
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    authenticator: Arc<Authenticator>,
    cookie_secure: bool,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        cookie_secure,
    };

    let public_routes = Router::new()
        .route("/", get(index))
        .route("/registro", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout));

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Headers are left out of the span: they carry the session cookie.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(ServiceBuilder::new().layer(trace_layer))
        .with_state(state)
}

/// State over a lazily connected in-memory store, for handler-level tests.
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let pool = sqlx::SqlitePool::connect_lazy("sqlite::memory:").expect("valid sqlite url");
    let hasher = auth::PasswordHasher::with_params(1024, 1, 1).expect("valid argon2 params");

    AppState {
        user_service: Arc::new(UserService::new(
            Arc::new(SqliteUserRepository::new(pool)),
            hasher,
        )),
        authenticator: Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            chrono::Duration::hours(1),
        )),
        cookie_secure: false,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let state = test_state();
        create_router(state.user_service, state.authenticator, false)
    }

    #[tokio::test]
    async fn test_index_redirects_anonymous_to_login() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_index_redirects_session_to_dashboard() {
        let state = test_state();
        let token = state.authenticator.issue_session(1, "alice").unwrap();
        let router = create_router(state.user_service, state.authenticator, false);

        let response = router
            .oneshot(
                Request::get("/")
                    .header(header::COOKIE, format!("session={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_logout_without_session_is_not_an_error() {
        let response = router()
            .oneshot(Request::get("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_login_page_renders() {
        let response = router()
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
