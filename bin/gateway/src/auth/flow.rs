//! The authorization callback as a chain of fallible steps.
//!
//! Each step either yields what the next one needs or fails with a
//! [`Rejection`] naming the last [`CallbackStage`] that was reached.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration as ChronoDuration;
use linkedin_signin_identity::{IdentityProfile, Session, verify_state};
use serde::Deserialize;
use std::fmt;
use time::Duration as TimeDuration;

use super::{PROFILE_COOKIE, SESSION_COOKIE};
use crate::app::AppState;
use crate::config::ProfileStorage;
use crate::error::GatewayError;

/// Query parameters LinkedIn appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declined or the IdP failed.
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// How far a callback got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStage {
    Start,
    StateValidated,
    TokenObtained,
    ProfileObtained,
    CookieSet,
    Redirected,
}

impl fmt::Display for CallbackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::StateValidated => "state_validated",
            Self::TokenObtained => "token_obtained",
            Self::ProfileObtained => "profile_obtained",
            Self::CookieSet => "cookie_set",
            Self::Redirected => "redirected",
        };
        f.write_str(name)
    }
}

/// A failed callback and the stage it failed after.
#[derive(Debug)]
pub struct Rejection {
    pub stage: CallbackStage,
    pub error: GatewayError,
}

fn reject(stage: CallbackStage, error: impl Into<GatewayError>) -> Rejection {
    Rejection {
        stage,
        error: error.into(),
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rejected after {}: {}", self.stage, self.error)
    }
}

impl std::error::Error for Rejection {}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        tracing::warn!(stage = %self.stage, error = %self.error, "Login callback rejected");
        self.error.into_response()
    }
}

/// Runs the callback up to the point where the profile is persisted.
///
/// `expected_state` is the value of the signed state cookie, if one arrived
/// with a valid signature. On success the returned jar carries the profile
/// or session cookie.
pub async fn complete_login(
    state: &AppState,
    query: &CallbackQuery,
    expected_state: Option<&str>,
    jar: CookieJar,
) -> Result<CookieJar, Rejection> {
    if let Some(error) = &query.error {
        tracing::warn!(
            idp_error = %error,
            idp_error_description = query.error_description.as_deref().unwrap_or_default(),
            "Identity provider returned an error"
        );
    }

    let code = verify_state(
        query.code.as_deref(),
        query.state.as_deref(),
        expected_state,
    )
    .map_err(|e| reject(CallbackStage::Start, e))?;

    let access_token = state
        .linkedin()
        .exchange_code(code)
        .await
        .map_err(|e| reject(CallbackStage::StateValidated, e))?;

    let claims = state
        .linkedin()
        .fetch_userinfo(&access_token)
        .await
        .map_err(|e| reject(CallbackStage::TokenObtained, e))?;

    let profile = IdentityProfile::from(claims);

    persist_profile(state, profile, jar)
        .await
        .map_err(|e| reject(CallbackStage::ProfileObtained, e))
}

async fn persist_profile(
    state: &AppState,
    profile: IdentityProfile,
    jar: CookieJar,
) -> Result<CookieJar, GatewayError> {
    let session_config = &state.config().session;

    match session_config.storage {
        ProfileStorage::Cookie => {
            let value = profile.to_cookie_value()?;
            let cookie = Cookie::build((PROFILE_COOKIE, value))
                .path("/")
                .http_only(false)
                .secure(session_config.secure_cookies)
                .same_site(SameSite::Lax);
            Ok(jar.add(cookie))
        }
        ProfileStorage::Server => {
            let duration = session_config.duration_minutes;
            let session = Session::new(profile, ChronoDuration::minutes(duration));
            let session_id = session.id();
            state.sessions().create(session).await;

            tracing::debug!(session_id = %session_id, "Created server-side session");

            let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
                .path("/")
                .http_only(true)
                .secure(session_config.secure_cookies)
                .same_site(SameSite::Lax)
                .max_age(TimeDuration::minutes(duration));
            Ok(jar.add(cookie))
        }
    }
}

/// Builds a cookie that makes the browser discard `name`.
pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_render_as_snake_case() {
        assert_eq!(CallbackStage::Start.to_string(), "start");
        assert_eq!(CallbackStage::StateValidated.to_string(), "state_validated");
        assert_eq!(CallbackStage::Redirected.to_string(), "redirected");
    }

    #[test]
    fn rejection_keeps_stage_and_error() {
        let rejection = reject(
            CallbackStage::Start,
            linkedin_signin_identity::StateError::Mismatch,
        );
        assert_eq!(rejection.stage, CallbackStage::Start);
        assert!(matches!(rejection.error, GatewayError::InvalidState));
        assert_eq!(rejection.to_string(), "rejected after start: invalid login state");
    }

    #[test]
    fn expired_cookie_has_zero_max_age() {
        let cookie = expired_cookie(PROFILE_COOKIE);
        assert_eq!(cookie.name(), "li_profile");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
    }
}
