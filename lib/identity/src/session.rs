//! Server-side sessions.
//!
//! When the gateway keeps profiles on the server, the browser only holds a
//! [`SessionId`] and the profile lives in a `Session` until it expires or the
//! user logs out.

use chrono::{DateTime, Duration, Utc};
use linkedin_signin_core::SessionId;
use serde::{Deserialize, Serialize};

use crate::profile::IdentityProfile;

/// A signed-in user's profile held on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    profile: IdentityProfile,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session with a fresh ID, valid for `duration`.
    #[must_use]
    pub fn new(profile: IdentityProfile, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            profile,
            created_at: now,
            expires_at: now + duration,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn profile(&self) -> &IdentityProfile {
        &self.profile
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
