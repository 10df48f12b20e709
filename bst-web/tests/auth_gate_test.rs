//! Tests for the session gate in front of the protected endpoints

mod common;

use axum::extract::Request;
use axum::Router;
use axum_test::TestServer;
use bst_web::{InMemorySessionStore, SessionAttributes, SessionStore};
use common::{create_test_server, session_cookie, spawn_api, RequestLog};
use serde_json::Value;

const PROTECTED: [(&str, &str); 6] = [
    ("GET", "/external/bst_api/eagate_login"),
    ("POST", "/external/bst_api/eagate_login"),
    ("POST", "/external/bst_api/eagate_logout"),
    ("PATCH", "/external/bst_api/ddr_update"),
    ("PATCH", "/external/bst_api/ddr_refresh"),
    ("GET", "/external/bst_api/ddr_stats"),
];

/// Mock API that records every request it receives, whatever the path
async fn recording_api() -> (String, RequestLog) {
    let log = RequestLog::new();
    let app = Router::new().fallback({
        let log = log.clone();
        move |request: Request| {
            let log = log.clone();
            async move {
                log.record(
                    request.method().as_str(),
                    request.uri().path(),
                    request.headers(),
                );
                r#"{"status":"ok","message":"reached"}"#
            }
        }
    });
    (spawn_api(app).await, log)
}

async fn send(
    server: &TestServer,
    method: &str,
    path: &str,
    cookie: Option<&str>,
) -> axum_test::TestResponse {
    let mut request = match method {
        "GET" => server.get(path),
        "POST" => server.post(path).json(&serde_json::json!({"username": "p"})),
        "PATCH" => server.patch(path),
        other => panic!("unexpected method {}", other),
    };
    if let Some(value) = cookie {
        request = request.add_cookie(session_cookie(value));
    }
    request.await
}

fn assert_unauthorized(response: &axum_test::TestResponse) {
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["status"], "bad");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

/// Test: no cookie at all is 401 and never reaches the API
#[tokio::test]
async fn test_protected_routes_without_cookie() {
    let (api, log) = recording_api().await;
    let (server, _) = create_test_server(&api);

    for (method, path) in PROTECTED {
        let response = send(&server, method, path, None).await;
        assert_unauthorized(&response);
    }
    assert_eq!(log.count(), 0);
}

/// Test: a cookie naming no session is 401
#[tokio::test]
async fn test_protected_routes_with_unknown_session() {
    let (api, log) = recording_api().await;
    let (server, _) = create_test_server(&api);

    for (method, path) in PROTECTED {
        let response = send(&server, method, path, Some("not-a-session")).await;
        assert_unauthorized(&response);
    }
    assert_eq!(log.count(), 0);
}

/// Test: a session without an access token is 401
#[tokio::test]
async fn test_protected_routes_with_tokenless_session() {
    let (api, log) = recording_api().await;
    let (server, sessions) = create_test_server(&api);
    let session = sessions.create(SessionAttributes::default()).unwrap().id.0;

    for (method, path) in PROTECTED {
        let response = send(&server, method, path, Some(&session)).await;
        assert_unauthorized(&response);
        let body: Value = response.json();
        assert_eq!(body["message"], "session has no access token");
    }
    assert_eq!(log.count(), 0);
}

/// Test: an empty access token counts as missing
#[tokio::test]
async fn test_empty_token_is_rejected() {
    let (api, log) = recording_api().await;
    let (server, sessions) = create_test_server(&api);
    let session = sessions
        .create(SessionAttributes::with_token(""))
        .unwrap()
        .id
        .0;

    let response = send(&server, "PATCH", "/external/bst_api/ddr_update", Some(&session)).await;

    assert_unauthorized(&response);
    assert_eq!(log.count(), 0);
}

/// Test: an expired session is 401
#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (api, log) = recording_api().await;
    let sessions = std::sync::Arc::new(InMemorySessionStore::new(chrono::Duration::zero()));
    let session = sessions
        .create(SessionAttributes::with_token("token-1"))
        .unwrap()
        .id
        .0;

    let upstream = bst_web::UpstreamClient::new(api.clone(), std::time::Duration::from_secs(5))
        .unwrap();
    let state = std::sync::Arc::new(bst_web::AppState::new_with_arcs(
        common::test_config(&api),
        sessions,
        std::sync::Arc::new(upstream),
    ));
    let server = TestServer::new(bst_web::routes::create_router(state)).unwrap();

    let response = send(&server, "GET", "/external/bst_api/ddr_stats", Some(&session)).await;

    assert_unauthorized(&response);
    assert_eq!(log.count(), 0);
}

/// Test: a valid session reaches the API with exactly one bearer header
#[tokio::test]
async fn test_valid_session_reaches_api() {
    let (api, log) = recording_api().await;
    let (server, sessions) = create_test_server(&api);
    let session = common::sign_in(&sessions, "token-ok");

    for (method, path) in PROTECTED {
        let response = send(&server, method, path, Some(&session)).await;
        assert_ne!(response.status_code(), 401, "{} {}", method, path);
    }

    assert_eq!(log.count(), PROTECTED.len());
    for (_, _, auth) in log.seen.lock().unwrap().iter() {
        assert_eq!(auth.as_deref(), Some("Bearer token-ok"));
    }
}

/// Test: unknown paths under the API prefix are a JSON 404
#[tokio::test]
async fn test_unknown_api_path_is_not_found() {
    let (api, _) = recording_api().await;
    let (server, _) = create_test_server(&api);

    let response = server.get("/external/bst_api/does_not_exist").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["status"], "bad");
}
