//! BST API client and proxy operations
//!
//! Every operation is one round trip to the API. Failures never escape as
//! errors to the browser; each operation maps them into its own typed
//! outcome:
//! - transport failure: `{bad, "api error"}` (status: everything `bad`)
//! - unreadable body: the zero value, which is not ok (status: `api=unknown`)
//! - a decoded `{bad, ...}` from the API is passed through as-is
//!
//! Operations are plain futures. When the browser goes away, hyper drops the
//! handler future and the in-flight API request is dropped with it.

use std::time::Duration;

use axum::body::Bytes;
use bst_models::{
    ApiStatus, HealthState, LoginRequest, LogoutRequest, OperationResult, ResultStatus,
    StatisticsRow, StatusReport, UserRecord,
};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::session::AccessToken;

const STATUS_PATH: &str = "status";
const LOGIN_PATH: &str = "user/login";
const LOGOUT_PATH: &str = "user/logout";
const PROFILE_UPDATE_PATH: &str = "ddr/profile/update";
const PROFILE_REFRESH_PATH: &str = "ddr/profile/refresh";
const SCORES_PATH: &str = "ddr/songs/scores/extended";

/// Default timeout for a BST API call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Decode a body that must be a JSON object.
///
/// Derived struct decoding also accepts an array read in field order, which
/// would let `["ok", ...]` pass as an envelope.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    serde_json::from_value(Value::Object(object))
}

/// e-amusement gate accounts linked to the caller
#[derive(Debug, Clone)]
pub struct IdentityListing {
    pub result: OperationResult,
    pub users: Vec<UserRecord>,
}

/// HTTP client for the BST API.
///
/// Redirects are returned rather than followed and no cookies are kept:
/// the only credential sent is the explicit bearer token.
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(base_url: &str, path: &str) -> String {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&AccessToken>) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, Self::build_url(&self.base_url, path));

        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// Execute a request and collect the body, whatever the status code
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Bytes, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(GatewayError::UpstreamUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, path, "BST API answered with non-success status");
        }

        response
            .bytes()
            .await
            .map_err(GatewayError::UpstreamUnreachable)
    }

    /// Run an operation whose answer is an `OperationResult` envelope
    async fn operation(&self, builder: RequestBuilder, path: &str) -> OperationResult {
        let body = match self.send(builder, path).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, path, "BST API call failed");
                return OperationResult::api_error();
            }
        };

        decode_object(&body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path, "Undecodable BST API envelope");
            OperationResult::default()
        })
    }

    /// GET /status
    pub async fn status(&self) -> ApiStatus {
        let mut status = ApiStatus::all_bad();

        let body = match self
            .send(self.request(Method::GET, STATUS_PATH, None), STATUS_PATH)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "BST API status check failed");
                return status;
            }
        };

        match decode_object::<StatusReport>(&body) {
            Ok(report) => status.apply(&report),
            Err(e) => {
                tracing::debug!(error = %e, "Undecodable status report");
                status.api = HealthState::Unknown;
            }
        }

        status
    }

    /// GET /user/login
    pub async fn list_identities(&self, token: &AccessToken) -> IdentityListing {
        let builder = self.request(Method::GET, LOGIN_PATH, Some(token));

        let users = match self.send(builder, LOGIN_PATH).await {
            Ok(body) => serde_json::from_slice::<Vec<UserRecord>>(&body),
            Err(e) => {
                tracing::warn!(error = %e, "Listing linked accounts failed");
                return IdentityListing {
                    result: OperationResult::api_error(),
                    users: Vec::new(),
                };
            }
        };

        match users {
            Ok(users) => IdentityListing {
                result: OperationResult::ok(format!("found {} users", users.len())),
                users,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Undecodable linked account list");
                IdentityListing {
                    result: OperationResult {
                        status: ResultStatus::Unknown,
                        message: "invalid api response".to_string(),
                    },
                    users: Vec::new(),
                }
            }
        }
    }

    /// POST /user/login
    pub async fn login(&self, token: &AccessToken, request: &LoginRequest) -> OperationResult {
        let builder = self
            .request(Method::POST, LOGIN_PATH, Some(token))
            .json(request);
        self.operation(builder, LOGIN_PATH).await
    }

    /// POST /user/logout
    pub async fn logout(&self, token: &AccessToken, request: &LogoutRequest) -> OperationResult {
        let builder = self
            .request(Method::POST, LOGOUT_PATH, Some(token))
            .json(request);
        self.operation(builder, LOGOUT_PATH).await
    }

    /// PATCH /ddr/profile/update
    pub async fn update_profile(&self, token: &AccessToken) -> OperationResult {
        let builder = self.request(Method::PATCH, PROFILE_UPDATE_PATH, Some(token));
        self.operation(builder, PROFILE_UPDATE_PATH).await
    }

    /// PATCH /ddr/profile/refresh
    pub async fn refresh_profile(&self, token: &AccessToken) -> OperationResult {
        let builder = self.request(Method::PATCH, PROFILE_REFRESH_PATH, Some(token));
        self.operation(builder, PROFILE_REFRESH_PATH).await
    }

    /// GET /ddr/songs/scores/extended
    pub async fn statistics(&self, token: &AccessToken) -> Result<Vec<StatisticsRow>, GatewayError> {
        let builder = self.request(Method::GET, SCORES_PATH, Some(token));
        let body = self.send(builder, SCORES_PATH).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            UpstreamClient::build_url("https://api.example.com/api/v1", "status"),
            "https://api.example.com/api/v1/status"
        );
        assert_eq!(
            UpstreamClient::build_url("https://api.example.com/api/v1/", "/ddr/profile/update"),
            "https://api.example.com/api/v1/ddr/profile/update"
        );
    }

    #[test]
    fn test_decode_object_rejects_arrays() {
        assert!(decode_object::<OperationResult>(br#"["ok","queued"]"#).is_err());
        assert!(decode_object::<StatusReport>(br#"["ok","ok","ok"]"#).is_err());

        let result: OperationResult =
            decode_object(br#"{"status":"ok","message":"queued"}"#).unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_client_creation() {
        let client = UpstreamClient::new("http://127.0.0.1:9", DEFAULT_TIMEOUT);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_unreachable_api_maps_to_api_error() {
        let client = UpstreamClient::new("http://127.0.0.1:1", Duration::from_secs(5)).unwrap();
        let token = AccessToken::new("token");

        assert_eq!(client.update_profile(&token).await, OperationResult::api_error());
        assert_eq!(client.status().await, ApiStatus::all_bad());
        assert!(matches!(
            client.statistics(&token).await,
            Err(GatewayError::UpstreamUnreachable(_))
        ));
    }
}
