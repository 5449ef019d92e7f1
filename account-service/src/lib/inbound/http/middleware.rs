use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::domain::user::models::UserId;
use crate::inbound::http::flash;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Access guard for protected routes.
///
/// Without a valid session cookie the request is answered with a redirect to
/// the login page and the wrapped handler never runs. Otherwise the session
/// is exposed as [`AuthenticatedUser`] and the handler runs unchanged.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(claims) = session::read(&jar, &state.authenticator) else {
        tracing::warn!(uri = %req.uri(), "Rejected request without a valid session");
        return flash::redirect_with_flash(
            session::end(jar),
            &state,
            "/login",
            Flash::warning("Please log in first"),
        );
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.sub),
        username: claims.username,
    });

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header;
    use axum::http::Request;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::inbound::http::router::test_state;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        format!("{}:{}", user.user_id, user.username)
    }

    fn guarded(state: AppState) -> Router {
        Router::new()
            .route("/private", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_missing_session_redirects_to_login() {
        let response = guarded(test_state())
            .oneshot(Request::get("/private").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert!(response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|value| value.to_str().unwrap().starts_with("flash=")));
    }

    #[tokio::test]
    async fn test_forged_session_redirects_and_clears_cookie() {
        let response = guarded(test_state())
            .oneshot(
                Request::get("/private")
                    .header(header::COOKIE, "session=forged.token.value")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|value| value.to_str().unwrap().starts_with("session=;")));
    }

    #[tokio::test]
    async fn test_valid_session_reaches_handler() {
        let state = test_state();
        let token = state.authenticator.issue_session(7, "alice").unwrap();

        let response = guarded(state)
            .oneshot(
                Request::get("/private")
                    .header(header::COOKIE, format!("session={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"7:alice");
    }
}
