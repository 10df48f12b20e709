//! Request interceptors
//!
//! A `Chain` is an ordered list of interceptors applied to a router in one
//! call. The first stage is the outermost. Stages are kept in three ranks,
//! and `with` preserves insertion order within a rank:
//! 1. `Common` (tracing, panic recovery)
//! 2. gates that may answer early (`RequireSession`, `RedirectHome`)
//! 3. response tagging (`ContentType`, `CacheControl`), nearest the handler

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{self, HeaderName};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Router;
use tower_cookies::Cookies;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::session::extract_token;
use crate::state::AppState;
use crate::store::SessionStore;

/// Where bare `/` is sent
pub const HOME_PATH: &str = "/home";

/// Which request paths a tagging interceptor applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    Always,
    Suffix(&'static str),
}

impl Match {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Match::Always => true,
            Match::Suffix(suffix) => path.ends_with(suffix),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interceptor {
    /// Request tracing and panic recovery
    Common,
    /// Answers 401 unless the session holds an access token
    RequireSession,
    /// Redirects bare `/` to the home page
    RedirectHome,
    /// Sets `Content-Type` on matching responses
    ContentType(Match, &'static str),
    /// Sets `Cache-Control` on matching responses
    CacheControl(Match, &'static str),
}

impl Interceptor {
    fn rank(&self) -> u8 {
        match self {
            Interceptor::Common => 0,
            Interceptor::RequireSession | Interceptor::RedirectHome => 1,
            Interceptor::ContentType(..) | Interceptor::CacheControl(..) => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    stages: Vec<Interceptor>,
}

impl Chain {
    /// A chain holding only the common stage
    pub fn common() -> Self {
        Self {
            stages: vec![Interceptor::Common],
        }
    }

    pub fn with(mut self, interceptor: Interceptor) -> Self {
        let position = self
            .stages
            .iter()
            .position(|stage| stage.rank() > interceptor.rank())
            .unwrap_or(self.stages.len());
        self.stages.insert(position, interceptor);
        self
    }

    /// Stages from outermost to innermost
    pub fn stages(&self) -> &[Interceptor] {
        &self.stages
    }

    /// Wrap every route of `router` in this chain
    pub fn apply<T, S>(&self, router: Router<T>, state: &Arc<AppState<S>>) -> Router<T>
    where
        T: Clone + Send + Sync + 'static,
        S: SessionStore + 'static,
    {
        // Layers added later wrap earlier ones, so add innermost first
        self.stages.iter().rev().fold(router, |router, stage| match *stage {
            Interceptor::Common => router
                .layer(CatchPanicLayer::new())
                .layer(TraceLayer::new_for_http()),
            Interceptor::RequireSession => router.layer(middleware::from_fn_with_state(
                state.clone(),
                require_session::<S>,
            )),
            Interceptor::RedirectHome => router.layer(middleware::from_fn(redirect_home)),
            Interceptor::ContentType(when, value) => router.layer(middleware::from_fn_with_state(
                ResponseTag {
                    name: header::CONTENT_TYPE,
                    when,
                    value,
                },
                tag_response,
            )),
            Interceptor::CacheControl(when, value) => router.layer(middleware::from_fn_with_state(
                ResponseTag {
                    name: header::CACHE_CONTROL,
                    when,
                    value,
                },
                tag_response,
            )),
        })
    }
}

async fn require_session<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    match extract_token(&cookies, state.session_store.as_ref()) {
        Ok(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), reason = %e, "Rejected request without session");
            e.into_response()
        }
    }
}

async fn redirect_home(request: Request, next: Next) -> Response {
    if request.uri().path() == "/" {
        return Redirect::to(HOME_PATH).into_response();
    }
    next.run(request).await
}

#[derive(Clone)]
struct ResponseTag {
    name: HeaderName,
    when: Match,
    value: &'static str,
}

async fn tag_response(State(tag): State<ResponseTag>, request: Request, next: Next) -> Response {
    let applies = tag.when.matches(request.uri().path());
    let mut response = next.run(request).await;
    if applies {
        response
            .headers_mut()
            .insert(tag.name, HeaderValue::from_static(tag.value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::store::InMemorySessionStore;
    use crate::upstream::{UpstreamClient, DEFAULT_TIMEOUT};

    fn test_state() -> Arc<AppState<InMemorySessionStore>> {
        let upstream = UpstreamClient::new("http://127.0.0.1:1", DEFAULT_TIMEOUT).unwrap();
        Arc::new(AppState::new(
            Config::default(),
            InMemorySessionStore::default(),
            upstream,
        ))
    }

    #[test]
    fn test_common_stage_comes_first() {
        let chain = Chain::common()
            .with(Interceptor::ContentType(Match::Always, "text/css"))
            .with(Interceptor::RequireSession);

        assert_eq!(
            chain.stages(),
            &[
                Interceptor::Common,
                Interceptor::RequireSession,
                Interceptor::ContentType(Match::Always, "text/css"),
            ]
        );
    }

    #[test]
    fn test_tagging_keeps_insertion_order() {
        let chain = Chain::common()
            .with(Interceptor::CacheControl(Match::Suffix(".js"), "max-age=60"))
            .with(Interceptor::RedirectHome)
            .with(Interceptor::ContentType(Match::Suffix(".js"), "application/javascript"));

        assert_eq!(
            chain.stages(),
            &[
                Interceptor::Common,
                Interceptor::RedirectHome,
                Interceptor::CacheControl(Match::Suffix(".js"), "max-age=60"),
                Interceptor::ContentType(Match::Suffix(".js"), "application/javascript"),
            ]
        );
    }

    #[test]
    fn test_suffix_match() {
        assert!(Match::Suffix(".js").matches("/dist/js/ddr.js"));
        assert!(!Match::Suffix(".js").matches("/dist/js/ddr.json"));
        assert!(Match::Always.matches("/anything"));
    }

    #[tokio::test]
    async fn test_tagging_applies_only_to_matching_paths() {
        let state = test_state();
        let router = Router::new()
            .route("/app.js", get(|| async { "js" }))
            .route("/page", get(|| async { "page" }));
        let app = Chain::common()
            .with(Interceptor::ContentType(Match::Suffix(".js"), "application/javascript"))
            .apply(router, &state);

        let response = app
            .clone()
            .oneshot(Request::get("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );

        let response = app
            .oneshot(Request::get("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_redirect_home_only_for_bare_root() {
        let state = test_state();
        let router = Router::new().fallback(|| async { "index" });
        let app = Chain::common()
            .with(Interceptor::RedirectHome)
            .apply(router, &state);

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], HOME_PATH);

        let response = app
            .oneshot(Request::get("/home").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
