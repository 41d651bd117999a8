//! Error types for the identity crate.
//!
//! - `ProfileError`: a stored profile could not be encoded or decoded
//! - `StateError`: an authorization callback failed the CSRF state check

use std::fmt;

/// Errors from encoding or decoding a stored identity profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The stored value is not a JSON document of the profile shape.
    Malformed { reason: String },
    /// The profile could not be serialized.
    Serialization { reason: String },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => write!(f, "malformed profile: {reason}"),
            Self::Serialization { reason } => {
                write!(f, "failed to serialize profile: {reason}")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

/// Reasons an authorization callback is rejected before any IdP call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The callback carried no authorization code.
    MissingCode,
    /// The callback carried no state parameter.
    MissingState,
    /// No (validly signed) state cookie accompanied the callback.
    MissingCookie,
    /// The state parameter differs from the cookie-bound value.
    Mismatch,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "callback is missing the authorization code"),
            Self::MissingState => write!(f, "callback is missing the state parameter"),
            Self::MissingCookie => write!(f, "no state cookie for this login attempt"),
            Self::Mismatch => write!(f, "state parameter does not match the state cookie"),
        }
    }
}

impl std::error::Error for StateError {}
