use std::convert::Infallible;

use auth::Authenticator;
use auth::SessionClaims;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;

use crate::inbound::http::router::AppState;

/// Name of the cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Session state of the current request, passed explicitly to handlers.
///
/// Resolves to anonymous when the cookie is absent, tampered, expired or
/// malformed.
#[derive(Debug, Clone)]
pub struct CurrentSession(Option<SessionClaims>);

impl CurrentSession {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self(read(&jar, &state.authenticator)))
    }
}

/// Validate the session cookie in `jar`, if any.
pub fn read(jar: &CookieJar, authenticator: &Authenticator) -> Option<SessionClaims> {
    let cookie = jar.get(SESSION_COOKIE)?;

    match authenticator.validate_session(cookie.value()) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            None
        }
    }
}

/// Attach a freshly issued session token.
pub fn start(jar: CookieJar, token: String, secure: bool) -> CookieJar {
    jar.add(cookie(SESSION_COOKIE, token, secure))
}

/// Drop the session cookie. A no-op when there is none.
pub fn end(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Browser-session cookie scoped to the whole site and hidden from scripts.
pub(crate) fn cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
