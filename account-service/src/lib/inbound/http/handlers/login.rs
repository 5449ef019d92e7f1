use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::flash;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::handlers::PageError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session;
use crate::inbound::http::session::CurrentSession;
use crate::inbound::http::views;
use crate::user::errors::UserError;

/// Shown for every credential mismatch, whichever factor was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

pub async fn login_form(
    current: CurrentSession,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if current.is_authenticated() {
        return Redirect::to("/dashboard").into_response();
    }

    let (jar, flash) = flash::take(jar, &state);
    (jar, views::login_page(flash.as_ref())).into_response()
}

pub async fn login(
    current: CurrentSession,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    if current.is_authenticated() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    if form.username.is_empty() || form.password.is_empty() {
        return Ok(flash::redirect_with_flash(
            jar,
            &state,
            "/login",
            Flash::danger("Please fill in all fields"),
        ));
    }

    let user = match state
        .user_service
        .authenticate(LoginCommand::new(form.username, form.password))
        .await
    {
        Ok(user) => user,
        Err(UserError::InvalidCredentials) => {
            tracing::info!("Login failed");
            return Ok(flash::redirect_with_flash(
                jar,
                &state,
                "/login",
                Flash::danger(INVALID_CREDENTIALS_MESSAGE),
            ));
        }
        Err(e) => return Err(PageError::from(e)),
    };

    let token = state
        .authenticator
        .issue_session(user.id.0, user.username.as_str())?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    let jar = session::start(jar, token, state.cookie_secure);
    Ok(flash::redirect_with_flash(
        jar,
        &state,
        "/dashboard",
        Flash::success(format!("Welcome {}!", user.username)),
    ))
}

/// Login form as posted by the browser. Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    username: String,
    password: String,
}
