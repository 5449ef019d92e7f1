use axum::response::Redirect;

use crate::inbound::http::session::CurrentSession;

pub async fn index(session: CurrentSession) -> Redirect {
    if session.is_authenticated() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}
