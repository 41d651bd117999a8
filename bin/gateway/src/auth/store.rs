//! In-memory session storage.
//!
//! Used when profiles are kept on the server. Sessions do not survive a
//! restart of the gateway.

use linkedin_signin_core::SessionId;
use linkedin_signin_identity::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared store of live sessions, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new session.
    pub async fn create(&self, session: Session) {
        self.sessions.write().await.insert(session.id(), session);
    }

    /// Finds a live session by ID.
    ///
    /// An expired session is removed and reported as absent.
    pub async fn find_by_id(&self, id: &SessionId) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(session) if !session.is_expired() => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.delete(id).await;
        None
    }

    /// Deletes a session by ID (logout). Deleting an unknown ID is a no-op.
    pub async fn delete(&self, id: &SessionId) {
        self.sessions.write().await.remove(id);
    }

    /// Deletes all expired sessions, returning how many were removed.
    pub async fn delete_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use linkedin_signin_identity::IdentityProfile;

    fn profile(name: &str) -> IdentityProfile {
        IdentityProfile {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_session_can_be_found() {
        let store = SessionStore::new();
        let session = Session::new(profile("Ada"), Duration::minutes(60));
        let id = session.id();

        store.create(session.clone()).await;

        assert_eq!(store.find_by_id(&id).await, Some(session));
    }

    #[tokio::test]
    async fn unknown_session_is_absent() {
        let store = SessionStore::new();
        assert_eq!(store.find_by_id(&SessionId::new()).await, None);
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_lookup() {
        let store = SessionStore::new();
        let session = Session::new(profile("Ada"), Duration::seconds(-1));
        let id = session.id();
        store.create(session).await;

        assert_eq!(store.find_by_id(&id).await, None);
        // Already gone, so the sweep has nothing left to remove.
        assert_eq!(store.delete_expired().await, 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = SessionStore::new();
        let session = Session::new(profile("Ada"), Duration::minutes(60));
        let id = session.id();
        store.create(session).await;

        store.delete(&id).await;
        store.delete(&id).await;

        assert_eq!(store.find_by_id(&id).await, None);
    }

    #[tokio::test]
    async fn delete_expired_keeps_live_sessions() {
        let store = SessionStore::new();
        let live = Session::new(profile("Ada"), Duration::minutes(60));
        let live_id = live.id();
        store.create(live).await;
        store
            .create(Session::new(profile("Grace"), Duration::seconds(-1)))
            .await;
        store
            .create(Session::new(profile("Alan"), Duration::seconds(-5)))
            .await;

        assert_eq!(store.delete_expired().await, 2);
        assert_eq!(store.delete_expired().await, 0);
        assert!(store.find_by_id(&live_id).await.is_some());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let store = SessionStore::new();
        let other = store.clone();
        let session = Session::new(profile("Ada"), Duration::minutes(60));
        let id = session.id();

        other.create(session).await;

        assert!(store.find_by_id(&id).await.is_some());
    }
}
