//! Client side of "Sign in with LinkedIn".
//!
//! [`SessionClient`] asks the gateway who is signed in, tracks the answer as
//! a [`ViewState`], and signs the user out. [`render`] turns a view state
//! into the [`Screen`] to show: the sign-in entry point or a profile card.

pub mod client;
pub mod error;
pub mod view;

pub use client::SessionClient;
pub use error::ClientError;
pub use view::{ANONYMOUS_DISPLAY_NAME, Notice, ProfileCard, Screen, ViewState, render};
