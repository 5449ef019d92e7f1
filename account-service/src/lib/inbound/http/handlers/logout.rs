use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::flash;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;
use crate::inbound::http::session::CurrentSession;

pub async fn logout(
    current: CurrentSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if let Some(claims) = current.claims() {
        tracing::info!(user_id = claims.sub, username = %claims.username, "User logged out");
    }

    flash::redirect_with_flash(
        session::end(jar),
        &state,
        "/login",
        Flash::info("You have been logged out"),
    )
}
