//! Gateway configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Public host name the gateway is served under
    pub host: String,

    /// Base URL of the BST API, e.g. `https://api.example.com/api/v1`
    pub api_url: String,

    /// Path prefix the `bst_api` routes are nested under
    pub api_prefix: String,

    /// Directory holding the built front-end (js, css, media, index page)
    pub static_dir: PathBuf,

    /// Entry point served for every page route, relative to `static_dir`
    pub index_page: String,

    /// Session lifetime in hours
    pub session_ttl_hours: i64,

    /// Timeout applied to every BST API call, in seconds
    pub api_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "localhost".to_string(),
            api_url: "https://localhost/api/v1".to_string(),
            api_prefix: "/external".to_string(),
            static_dir: PathBuf::from("dist"),
            index_page: "index.html".to_string(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            api_timeout_secs: crate::upstream::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Create config from environment variables, falling back to defaults
    ///
    /// - BST_PORT
    /// - BST_HOST
    /// - BST_API_URL
    /// - BST_API_PREFIX
    /// - BST_STATIC_DIR
    /// - BST_INDEX_PAGE
    /// - BST_SESSION_TTL_HOURS
    /// - BST_API_TIMEOUT_SECS
    pub fn from_env() -> Self {
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
            match get_env(key) {
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    tracing::warn!(key, value = %raw, "Ignoring unparsable setting");
                    default
                }),
                None => default,
            }
        }

        let defaults = Self::default();

        Self {
            port: parse_env("BST_PORT", defaults.port),
            host: get_env("BST_HOST").unwrap_or(defaults.host),
            api_url: get_env("BST_API_URL").unwrap_or(defaults.api_url),
            // An empty prefix is meaningful (routes at the root), so read it raw
            api_prefix: std::env::var("BST_API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.api_prefix),
            static_dir: get_env("BST_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            index_page: get_env("BST_INDEX_PAGE").unwrap_or(defaults.index_page),
            session_ttl_hours: valid_ttl_hours(
                parse_env("BST_SESSION_TTL_HOURS", defaults.session_ttl_hours),
                defaults.session_ttl_hours,
            ),
            api_timeout_secs: parse_env("BST_API_TIMEOUT_SECS", defaults.api_timeout_secs),
        }
    }

    /// Session lifetime. Out-of-range hours fall back to the default.
    pub fn session_ttl(&self) -> chrono::Duration {
        session_ttl(self.session_ttl_hours)
            .or_else(|| session_ttl(DEFAULT_SESSION_TTL_HOURS))
            .unwrap_or_else(chrono::Duration::zero)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_page)
    }
}

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// A positive lifetime `chrono` can represent
fn session_ttl(hours: i64) -> Option<chrono::Duration> {
    chrono::Duration::try_hours(hours).filter(|ttl| *ttl > chrono::Duration::zero())
}

fn valid_ttl_hours(hours: i64, default: i64) -> i64 {
    if session_ttl(hours).is_some() {
        hours
    } else {
        tracing::warn!(hours, "Ignoring out-of-range BST_SESSION_TTL_HOURS");
        default
    }
}

/// `external/` and `/external` both become `/external`; empty stays empty
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
