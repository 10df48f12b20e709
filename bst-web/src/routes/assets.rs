//! Front-end entry point and scripts

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;
use crate::store::SessionStore;

/// Fallback for every path no other route claims.
///
/// `*.js` is looked up in the static directory; anything else gets the index
/// page so the front-end router can take over.
pub async fn entry_point<S>(State(state): State<Arc<AppState<S>>>, request: Request) -> Response
where
    S: SessionStore + 'static,
{
    let result = if request.uri().path().ends_with(".js") {
        ServeDir::new(&state.config.static_dir).oneshot(request).await
    } else {
        ServeFile::new(state.config.index_path())
            .oneshot(request)
            .await
    };

    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

