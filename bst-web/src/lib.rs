//! BST Web Gateway
//!
//! Serves the BST front-end and proxies its API calls to the BST API,
//! authorizing each call with the bearer token held in the caller's
//! session.

pub mod config;
pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod upstream;

pub use config::Config;
pub use error::GatewayError;
pub use middleware::{Chain, Interceptor, Match};
pub use session::{extract_token, AccessToken, SESSION_COOKIE};
pub use state::AppState;
pub use store::{InMemorySessionStore, Profile, SessionAttributes, SessionId, SessionStore};
pub use upstream::UpstreamClient;
