//! Core types and utilities shared by the linkedin-signin crates.
//!
//! This crate provides the `Result` alias used by the library crates and the
//! opaque identifier handed to browsers when profiles are kept server-side.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, SessionId};
