//! Authentication module for the gateway.
//!
//! This module provides:
//! - The LinkedIn OAuth 2.0 / OIDC client
//! - The callback flow, as explicit fallible stages
//! - In-memory storage for server-side sessions
//! - The axum handlers for the public routes
//!
//! # Cookies
//!
//! | Name | Contents | Flags |
//! |---|---|---|
//! | `li_state` | CSRF state of a login attempt, signed | http-only, lax, short-lived |
//! | `li_profile` | Profile JSON (cookie storage) | readable by script, lax |
//! | `li_session` | Session ID (server storage) | http-only, lax |

pub mod flow;
pub mod linkedin;
pub mod routes;
pub mod store;

pub use flow::{CallbackQuery, CallbackStage, Rejection};
pub use linkedin::{AuthorizationRequest, IdpError, LinkedInClient};
pub use routes::{callback, login, logout, me};
pub use store::SessionStore;

/// CSRF state cookie name.
pub const STATE_COOKIE: &str = "li_state";

/// Profile cookie name.
pub const PROFILE_COOKIE: &str = "li_profile";

/// Session cookie name.
pub const SESSION_COOKIE: &str = "li_session";
