//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::store::SessionStore;
use crate::upstream::UpstreamClient;

/// State handed to every handler.
///
/// Built once at startup; the store and the upstream client are shared by
/// all requests.
pub struct AppState<S> {
    pub session_store: Arc<S>,
    pub upstream: Arc<UpstreamClient>,
    pub config: Config,
}

impl<S: SessionStore> AppState<S> {
    pub fn new(config: Config, session_store: S, upstream: UpstreamClient) -> Self {
        Self::new_with_arcs(config, Arc::new(session_store), Arc::new(upstream))
    }

    /// Build state around a store the caller keeps a handle to
    pub fn new_with_arcs(
        config: Config,
        session_store: Arc<S>,
        upstream: Arc<UpstreamClient>,
    ) -> Self {
        Self {
            session_store,
            upstream,
            config,
        }
    }
}
