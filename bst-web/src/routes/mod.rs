//! HTTP routes for the gateway

mod assets;
mod auth;
mod bst_api;
mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::services::ServeDir;

use crate::middleware::{Chain, Interceptor, Match};
use crate::state::AppState;
use crate::store::SessionStore;

/// Cache policy for versioned front-end assets
const STATIC_CACHE: &str = "public, max-age=604800";

/// Create the router with all routes
pub fn create_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: SessionStore + 'static,
{
    let api_path = format!("{}/bst_api", state.config.api_prefix);
    let static_dir = state.config.static_dir.clone();

    let account = Chain::common().apply(
        Router::new()
            .route("/whoami", get(session::whoami::<S>))
            .route("/auth/logout", post(auth::logout::<S>)),
        &state,
    );

    let css = Chain::common()
        .with(Interceptor::ContentType(Match::Always, "text/css"))
        .apply(
            Router::new().nest_service("/css", ServeDir::new(static_dir.join("css"))),
            &state,
        );

    let media = Chain::common()
        .with(Interceptor::CacheControl(Match::Always, STATIC_CACHE))
        .apply(
            Router::new().nest_service("/media", ServeDir::new(static_dir.join("media"))),
            &state,
        );

    // Everything else: scripts by suffix, the single-page entry point otherwise
    let pages = Chain::common()
        .with(Interceptor::RedirectHome)
        .with(Interceptor::ContentType(
            Match::Suffix(".js"),
            "application/javascript",
        ))
        .with(Interceptor::CacheControl(Match::Suffix(".js"), STATIC_CACHE))
        .apply(Router::new().fallback(assets::entry_point::<S>), &state);

    Router::new()
        .nest(&api_path, bst_api::router(&state))
        .merge(account)
        .merge(css)
        .merge(media)
        .merge(pages)
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
