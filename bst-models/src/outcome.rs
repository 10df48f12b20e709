//! The `{status, message}` envelope

use serde::{Deserialize, Serialize};

/// Outcome of an operation.
///
/// `Unknown` is the zero value: it is what an envelope holds when the API
/// answered with something that could not be read, and it is never ok.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Ok,
    Bad,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Uniform result of login, logout, profile update and profile refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default)]
    pub message: String,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Ok,
            message: message.into(),
        }
    }

    pub fn bad(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Bad,
            message: message.into(),
        }
    }

    /// The fixed outcome for an API that could not be reached
    pub fn api_error() -> Self {
        Self::bad("api error")
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResultStatus::Ok
    }
}
