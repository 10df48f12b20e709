//! e-amusement gate account linking

use serde::{Deserialize, Serialize};

/// An e-amusement gate identity linked to the caller's BST account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub name: String,
    pub expired: bool,
}

/// Credentials forwarded to the API to link an e-amusement gate account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Unlinks a previously linked e-amusement gate account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoutRequest {
    pub username: String,
}
