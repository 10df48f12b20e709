//! BST API proxy endpoints
//!
//! Browser-facing status codes come from the mapped outcome, never from the
//! API's own status code: `ok` is 200, anything else 500. A missing or
//! unusable session is 401 before the API is contacted.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use bst_models::{ApiStatus, LoginRequest, LogoutRequest, OperationResult};
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::middleware::{Chain, Interceptor};
use crate::render;
use crate::session::AccessToken;
use crate::state::AppState;
use crate::store::SessionStore;

pub fn router<S>(state: &Arc<AppState<S>>) -> Router<Arc<AppState<S>>>
where
    S: SessionStore + 'static,
{
    let public = Router::new().route("/status", get(status_get::<S>));

    let protected = Router::new()
        .route(
            "/eagate_login",
            get(eagate_login_get::<S>).post(eagate_login_post::<S>),
        )
        .route("/eagate_logout", post(eagate_logout_post::<S>))
        .route("/ddr_update", patch(ddr_update_patch::<S>))
        .route("/ddr_refresh", patch(ddr_refresh_patch::<S>))
        .route("/ddr_stats", get(ddr_stats_get::<S>));

    Chain::common()
        .apply(public, state)
        .merge(
            Chain::common()
                .with(Interceptor::RequireSession)
                .apply(protected, state),
        )
        .fallback(not_found)
}

fn outcome_response(result: OperationResult) -> Response {
    let status = if result.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result)).into_response()
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        GatewayError::InvalidRequest("invalid request body".to_string())
    })
}

/// GET /bst_api/status
pub async fn status_get<S>(State(state): State<Arc<AppState<S>>>) -> Json<ApiStatus>
where
    S: SessionStore,
{
    Json(state.upstream.status().await)
}

/// GET /bst_api/eagate_login
pub async fn eagate_login_get<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
) -> Response
where
    S: SessionStore,
{
    let listing = state.upstream.list_identities(&token).await;

    if !listing.result.is_ok() {
        return outcome_response(listing.result);
    }

    tracing::debug!(message = %listing.result.message, "Listed linked accounts");
    Json(listing.users).into_response()
}

/// POST /bst_api/eagate_login
pub async fn eagate_login_post<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    S: SessionStore,
{
    let request: LoginRequest = parse_body(&body)?;

    let result = state.upstream.login(&token, &request).await;
    if !result.is_ok() {
        tracing::info!(message = %result.message, "Failed to link e-amusement account");
    }

    Ok(outcome_response(result))
}

/// POST /bst_api/eagate_logout
pub async fn eagate_logout_post<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    S: SessionStore,
{
    let request: LogoutRequest = parse_body(&body)?;

    let result = state.upstream.logout(&token, &request).await;
    if !result.is_ok() {
        tracing::info!(message = %result.message, "Failed to logout user");
    }

    Ok(outcome_response(result))
}

/// PATCH /bst_api/ddr_update
pub async fn ddr_update_patch<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
) -> Response
where
    S: SessionStore,
{
    let result = state.upstream.update_profile(&token).await;
    if !result.is_ok() {
        tracing::info!(message = %result.message, "Failed to update ddr profile");
    }

    outcome_response(result)
}

/// PATCH /bst_api/ddr_refresh
pub async fn ddr_refresh_patch<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
) -> Response
where
    S: SessionStore,
{
    let result = state.upstream.refresh_profile(&token).await;
    if !result.is_ok() {
        tracing::info!(message = %result.message, "Failed to refresh ddr profile");
    }

    outcome_response(result)
}

/// GET /bst_api/ddr_stats
///
/// Always 200: the fragment is inserted straight into the page, so failures
/// are rendered inline.
pub async fn ddr_stats_get<S>(
    State(state): State<Arc<AppState<S>>>,
    token: AccessToken,
) -> Html<String>
where
    S: SessionStore,
{
    let markup = match state.upstream.statistics(&token).await {
        Ok(rows) => render::statistics_table(&rows),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load ddr statistics");
            render::statistics_error()
        }
    };

    Html(markup.into_string())
}

async fn not_found() -> (StatusCode, Json<OperationResult>) {
    (StatusCode::NOT_FOUND, Json(OperationResult::bad("not found")))
}
