//! Session cookies and the delegated access token
//!
//! `extract_token` is the only place a request is authorized: it resolves
//! the caller's BST API token from the session named by the `auth-session`
//! cookie. Handlers receive it through the `AccessToken` extractor, so a
//! handler that needs a token cannot run without one.

use std::fmt;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_cookies::{Cookie, Cookies};

use crate::error::GatewayError;
use crate::state::AppState;
use crate::store::{Session, SessionId, SessionStore};

pub const SESSION_COOKIE: &str = "auth-session";

/// Bearer token for the BST API, taken from the caller's session
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Look up the live session named by the session cookie
pub fn session_from_cookies<S: SessionStore>(
    cookies: &Cookies,
    session_store: &S,
) -> Result<Session, GatewayError> {
    let cookie = cookies
        .get(SESSION_COOKIE)
        .ok_or(GatewayError::Unauthenticated("not logged in"))?;
    let session_id = SessionId(cookie.value().to_string());

    match session_store.get(&session_id) {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(GatewayError::Unauthenticated("session expired or unknown")),
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed");
            Err(GatewayError::Unauthenticated("session unavailable"))
        }
    }
}

/// Resolve the caller's access token. Read-only.
pub fn extract_token<S: SessionStore>(
    cookies: &Cookies,
    session_store: &S,
) -> Result<AccessToken, GatewayError> {
    let session = session_from_cookies(cookies, session_store)?;

    session
        .attributes
        .access_token
        .filter(|token| !token.is_empty())
        .map(AccessToken)
        .ok_or(GatewayError::Unauthenticated("session has no access token"))
}

impl<S> FromRequestParts<Arc<AppState<S>>> for AccessToken
where
    S: SessionStore + 'static,
{
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the session gate for this request
        if let Some(token) = parts.extensions.get::<AccessToken>() {
            return Ok(token.clone());
        }

        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| GatewayError::Config(msg.to_string()))?;

        extract_token(&cookies, state.session_store.as_ref())
    }
}

/// Helper to clear session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}
