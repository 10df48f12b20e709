//! Who is signed in

use std::sync::Arc;

use axum::extract::State;
use tower_cookies::Cookies;

use crate::session::session_from_cookies;
use crate::state::AppState;
use crate::store::SessionStore;

/// GET /whoami
///
/// The nickname of the signed-in user, or an empty body.
pub async fn whoami<S>(State(state): State<Arc<AppState<S>>>, cookies: Cookies) -> String
where
    S: SessionStore,
{
    session_from_cookies(&cookies, state.session_store.as_ref())
        .ok()
        .filter(|session| session.attributes.access_token.is_some())
        .and_then(|session| session.attributes.nickname().map(str::to_string))
        .unwrap_or_default()
}
