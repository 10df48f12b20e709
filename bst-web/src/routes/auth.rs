//! Ending a gateway session

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use bst_models::OperationResult;
use tower_cookies::Cookies;

use crate::session::{clear_session_cookie, SESSION_COOKIE};
use crate::state::AppState;
use crate::store::{SessionId, SessionStore};

/// POST /auth/logout
///
/// Drops the session and its cookie. Succeeds whether or not a session
/// existed.
pub async fn logout<S>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
) -> Json<OperationResult>
where
    S: SessionStore,
{
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        let session_id = SessionId(cookie.value().to_string());
        if let Err(e) = state.session_store.delete(&session_id) {
            tracing::warn!(error = %e, "Failed to delete session");
        }
    }

    clear_session_cookie(&cookies);

    Json(OperationResult::ok("logged out"))
}
