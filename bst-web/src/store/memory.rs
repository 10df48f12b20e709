//! In-memory session store

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{Session, SessionAttributes, SessionId, SessionStore, StoreResult};
use crate::error::GatewayError;

/// In-memory session store with a fixed session lifetime
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of sessions held, expired ones included
    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

fn poisoned<T>(_: T) -> GatewayError {
    GatewayError::Store("session lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, attributes: SessionAttributes) -> StoreResult<Session> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| GatewayError::Store("session expiry out of range".to_string()))?;
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            attributes,
            created_at: now,
            expires_at,
        };
        self.sessions
            .write()
            .map_err(poisoned)?
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        let session = self.sessions.read().map_err(poisoned)?.get(session_id).cloned();

        match session {
            Some(session) if session.is_expired(Utc::now()) => {
                self.sessions.write().map_err(poisoned)?.remove(session_id);
                tracing::debug!(session_id = %session_id.0, "Evicted expired session");
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        self.sessions.write().map_err(poisoned)?.remove(session_id);
        Ok(())
    }

    fn cleanup_expired(&self) -> StoreResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
