//! Session storage

pub mod memory;
pub mod models;

pub use memory::InMemorySessionStore;
pub use models::*;

use crate::error::GatewayError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, GatewayError>;

/// Keyed, cookie-bound session storage.
///
/// Sessions are created by the sign-in handshake and only read or deleted
/// by the gateway. Each call is atomic; callers never hold a lock across an
/// upstream request.
pub trait SessionStore: Send + Sync {
    /// Create a new session holding the given attributes
    fn create(&self, attributes: SessionAttributes) -> StoreResult<Session>;

    /// Get a live session by ID. Expired sessions are reported as absent.
    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>>;

    /// Delete a session. Deleting an unknown session is not an error.
    fn delete(&self, session_id: &SessionId) -> StoreResult<()>;

    /// Drop every expired session, returning how many were removed
    fn cleanup_expired(&self) -> StoreResult<u64>;
}
