use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::router::AppState;
use crate::inbound::http::session;

/// Name of the cookie carrying a pending flash message.
pub const FLASH_COOKIE: &str = "flash";

/// How long an unread flash message survives.
const FLASH_LIFETIME_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
        }
    }
}

/// One-shot message shown on the page after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }
}

/// Signed form of a flash message. `exp` bounds how long it can be replayed.
#[derive(Debug, Serialize, Deserialize)]
struct SealedFlash {
    #[serde(flatten)]
    flash: Flash,
    exp: i64,
}

/// Queue `flash` for the next rendered page.
pub fn push(jar: CookieJar, state: &AppState, flash: Flash) -> CookieJar {
    let sealed = SealedFlash {
        flash,
        exp: (Utc::now() + Duration::minutes(FLASH_LIFETIME_MINUTES)).timestamp(),
    };

    match state.authenticator.sign(&sealed) {
        Ok(token) => jar.add(session::cookie(FLASH_COOKIE, token, state.cookie_secure)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to sign flash message");
            jar
        }
    }
}

/// Remove and return the pending flash message, if any.
///
/// Unreadable flash cookies are discarded silently.
pub fn take(jar: CookieJar, state: &AppState) -> (CookieJar, Option<Flash>) {
    let flash = jar.get(FLASH_COOKIE).and_then(|cookie| {
        state
            .authenticator
            .verify::<SealedFlash>(cookie.value())
            .map(|sealed| sealed.flash)
            .map_err(|e| tracing::debug!(error = %e, "Discarding unreadable flash cookie"))
            .ok()
    });

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

/// Redirect (303) to `to`, carrying `flash` to the target page.
pub fn redirect_with_flash(jar: CookieJar, state: &AppState, to: &str, flash: Flash) -> Response {
    (push(jar, state, flash), Redirect::to(to)).into_response()
}
