//! Common test utilities for gateway integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::HeaderMap;
use axum::Router;
use axum_test::TestServer;
use bst_web::{
    routes, AppState, Config, InMemorySessionStore, Profile, SessionAttributes, SessionStore,
    UpstreamClient, SESSION_COOKIE,
};
use tokio::net::TcpListener;

/// An address nothing listens on
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1";

/// Requests seen by a mock API: (method, path, authorization header)
#[derive(Default, Clone)]
pub struct RequestLog {
    pub seen: Arc<Mutex<Vec<(String, String, Option<String>)>>>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, method: &str, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), auth));
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, String, Option<String>)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

/// Serve a mock BST API on an ephemeral port and return its base URL
pub async fn spawn_api(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

/// Mount a mock API router under the `/api/v1` base path
pub async fn spawn_api_routes(routes: Router) -> String {
    spawn_api(Router::new().nest("/api/v1", routes)).await
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        ..Config::default()
    }
}

/// Create a test server talking to the given API, with access to the store
pub fn create_test_server_with_config(
    config: Config,
) -> (TestServer, Arc<InMemorySessionStore>) {
    let sessions = Arc::new(InMemorySessionStore::default());
    let upstream = UpstreamClient::new(config.api_url.clone(), Duration::from_secs(5))
        .expect("Failed to create upstream client");

    let state = Arc::new(AppState::new_with_arcs(
        config,
        sessions.clone(),
        Arc::new(upstream),
    ));

    let app = routes::create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, sessions)
}

pub fn create_test_server(api_url: &str) -> (TestServer, Arc<InMemorySessionStore>) {
    create_test_server_with_config(test_config(api_url))
}

/// Create a signed-in session holding `token` and return the cookie value
pub fn sign_in(sessions: &InMemorySessionStore, token: &str) -> String {
    let attributes = SessionAttributes {
        access_token: Some(token.to_string()),
        profile: Some(Profile {
            nickname: Some("dancer".to_string()),
            ..Profile::default()
        }),
    };
    sessions.create(attributes).unwrap().id.0
}

pub fn session_cookie(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, value.to_string())
}
