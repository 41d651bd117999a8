//! Identity types for the linkedin-signin gateway and its clients.
//!
//! This crate provides:
//! - The identity profile projected from LinkedIn's OIDC userinfo claims
//!   (`IdentityProfile`, `UserinfoClaims`)
//! - Identity provider configuration (`ProviderConfig`)
//! - CSRF state validation for the authorization callback (`verify_state`)
//! - Server-side session records (`Session`)
//!
//! # Example
//!
//! ```
//! use linkedin_signin_identity::{IdentityProfile, UserinfoClaims};
//!
//! let claims: UserinfoClaims = serde_json::from_str(
//!     r#"{"sub":"782bbtaQ","name":"Ada Lovelace","email":"ada@example.com","email_verified":true}"#,
//! )
//! .unwrap();
//!
//! let profile = IdentityProfile::from(claims);
//! let cookie = profile.to_cookie_value().unwrap();
//! assert_eq!(IdentityProfile::from_cookie_value(&cookie).unwrap(), profile);
//! assert_eq!(profile.display_name(), Some("Ada Lovelace"));
//! ```

pub mod error;
pub mod profile;
pub mod provider;
pub mod session;
pub mod state;

// Re-export main types at crate root
pub use error::{ProfileError, StateError};
pub use profile::{IdentityProfile, Locale, UserinfoClaims};
pub use provider::{ProviderConfig, ProviderConfigBuilder};
pub use session::Session;
pub use state::{STATE_TOKEN_BYTES, verify_state};
