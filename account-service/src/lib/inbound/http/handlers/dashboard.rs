use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum_extra::extract::CookieJar;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::flash;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::handlers::PageError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;
use crate::inbound::http::views;
use crate::user::errors::UserError;

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    match state.user_service.get_user(&current.user_id).await {
        Ok(user) => {
            let (jar, flash) = flash::take(jar, &state);
            Ok((jar, views::dashboard_page(&user, flash.as_ref())).into_response())
        }
        // The account vanished behind a live session; the session is void.
        Err(UserError::NotFound(_)) => {
            tracing::warn!(
                user_id = %current.user_id,
                username = %current.username,
                "Session references a missing user, forcing logout"
            );
            Ok(flash::redirect_with_flash(
                session::end(jar),
                &state,
                "/login",
                Flash::warning("Your session is no longer valid. Please log in again."),
            ))
        }
        Err(e) => Err(PageError::from(e)),
    }
}
