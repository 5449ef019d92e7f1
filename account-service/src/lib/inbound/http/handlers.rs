use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use super::views;
use crate::user::errors::UserError;

pub mod dashboard;
pub mod index;
pub mod login;
pub mod logout;
pub mod register;

/// Failure that cannot be recovered with a redirect and a flash message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    InternalServerError(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::error_page("The request could not be completed. Please try again."),
                )
                    .into_response()
            }
        }
    }
}

impl From<UserError> for PageError {
    fn from(err: UserError) -> Self {
        PageError::InternalServerError(err.to_string())
    }
}

impl From<auth::JwtError> for PageError {
    fn from(err: auth::JwtError) -> Self {
        PageError::InternalServerError(err.to_string())
    }
}
