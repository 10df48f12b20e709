//! Service health reported by `GET /status`

use serde::{Deserialize, Serialize};

/// Health of one backing service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Ok,
    #[default]
    Bad,
    Unknown,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Ok => "ok",
            HealthState::Bad => "bad",
            HealthState::Unknown => "unknown",
        }
    }

    /// Parse a wire value. Anything unrecognized yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(HealthState::Ok),
            "bad" => Some(HealthState::Bad),
            "unknown" => Some(HealthState::Unknown),
            _ => None,
        }
    }
}

/// Health of the API, the e-amusement gate and the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub api: HealthState,
    pub eagate: HealthState,
    pub db: HealthState,
}

impl ApiStatus {
    /// Every service assumed down until the API says otherwise
    pub fn all_bad() -> Self {
        Self::default()
    }

    /// Overwrite the fields the report carries a recognized value for.
    ///
    /// Missing or unrecognized values leave the current state untouched.
    pub fn apply(&mut self, report: &StatusReport) {
        let fields = [
            (&mut self.api, report.api.as_deref()),
            (&mut self.eagate, report.eagate.as_deref()),
            (&mut self.db, report.db.as_deref()),
        ];
        for (state, value) in fields {
            if let Some(parsed) = value.and_then(HealthState::parse) {
                *state = parsed;
            }
        }
    }
}

/// Raw status body as sent by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub eagate: Option<String>,
    #[serde(default)]
    pub db: Option<String>,
}
