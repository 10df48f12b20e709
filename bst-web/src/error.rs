//! Gateway error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bst_models::OperationResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No usable access token for the request. Never reaches the API.
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("BST API unreachable: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("Invalid BST API response: {0}")]
    UpstreamDecode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnreachable(_)
            | GatewayError::UpstreamDecode(_)
            | GatewayError::Store(_)
            | GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            GatewayError::Unauthenticated(reason) => OperationResult::bad(*reason),
            GatewayError::UpstreamUnreachable(e) => {
                tracing::warn!(error = %e, "BST API unreachable");
                OperationResult::api_error()
            }
            GatewayError::UpstreamDecode(e) => {
                tracing::warn!(error = %e, "Undecodable BST API response");
                OperationResult::bad("invalid api response")
            }
            GatewayError::InvalidRequest(msg) => OperationResult::bad(msg.as_str()),
            GatewayError::Store(msg) | GatewayError::Config(msg) => {
                tracing::error!("Internal error: {}", msg);
                OperationResult::bad("internal error")
            }
        };

        (status, Json(body)).into_response()
    }
}
