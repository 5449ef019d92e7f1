use axum::extract::State;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::flash;
use crate::inbound::http::flash::Flash;
use crate::inbound::http::router::AppState;
use crate::inbound::http::views;
use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UsernameError;

pub async fn register_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, flash) = flash::take(jar, &state);
    (jar, views::register_page(flash.as_ref())).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let command = match form.try_into_command() {
        Ok(command) => command,
        Err(e) => {
            tracing::debug!(reason = %e, "Registration rejected");
            return flash::redirect_with_flash(jar, &state, "/registro", Flash::danger(e.to_string()));
        }
    };

    match state.user_service.register_user(command).await {
        Ok(_) => flash::redirect_with_flash(
            jar,
            &state,
            "/login",
            Flash::success("Registration successful! Please log in."),
        ),
        Err(e) => flash::redirect_with_flash(
            jar,
            &state,
            "/registro",
            Flash::danger(failure_message(&e)),
        ),
    }
}

fn failure_message(err: &UserError) -> &'static str {
    match err {
        UserError::UsernameAlreadyExists(_) => "That username is already taken",
        UserError::EmailAlreadyExists(_) => "That email is already registered",
        _ => {
            tracing::error!(error = %err, "User creation failed");
            "Error creating the user"
        }
    }
}

/// Registration form as posted by the browser. Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum RegistrationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterForm {
    /// Validate in a fixed order: presence, confirmation, then field shape.
    fn try_into_command(self) -> Result<RegisterUserCommand, RegistrationError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(RegistrationError::MissingFields);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterUserCommand::new(username, email, self.password))
    }
}
