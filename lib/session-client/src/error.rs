//! Error types for the session client.

use std::fmt;

/// Errors returned by [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend URL could not be parsed.
    InvalidBackend { url: String, reason: String },
    /// The gateway could not be reached.
    Transport { reason: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBackend { url, reason } => {
                write!(f, "invalid backend URL '{url}': {reason}")
            }
            Self::Transport { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for ClientError {}
