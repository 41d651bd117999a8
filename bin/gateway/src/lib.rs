//! Authorization gateway for "Sign in with LinkedIn".
//!
//! The gateway runs the OAuth 2.0 authorization code flow against LinkedIn,
//! fetches the user's OpenID Connect userinfo claims, and exposes the
//! resulting profile to a frontend through cookies.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;

pub use app::{AppState, router};
pub use config::GatewayConfig;
pub use error::{GatewayError, StartupError};
