//! Data models for session storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique session identifier, carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Profile of the signed-in user, as returned by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub nickname: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Attributes held in a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionAttributes {
    /// Delegated bearer token for the BST API
    pub access_token: Option<String>,
    pub profile: Option<Profile>,
}

impl SessionAttributes {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            profile: None,
        }
    }

    pub fn nickname(&self) -> Option<&str> {
        self.profile.as_ref()?.nickname.as_deref()
    }
}

/// A user session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub attributes: SessionAttributes,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
