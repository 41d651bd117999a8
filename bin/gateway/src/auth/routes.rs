//! Routes for login, callback, identity lookup and logout.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, CookieJar, SameSite},
};
use linkedin_signin_core::SessionId;
use linkedin_signin_identity::IdentityProfile;
use serde::Serialize;
use time::Duration as TimeDuration;

use super::flow::{self, CallbackQuery, CallbackStage, Rejection};
use super::{PROFILE_COOKIE, SESSION_COOKIE, STATE_COOKIE};
use crate::app::AppState;
use crate::config::ProfileStorage;
use crate::error::GatewayError;

/// A `302 Found` redirect to `location`.
fn found(location: String) -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, location)])
}

/// Starts the login flow by redirecting to LinkedIn's authorization page.
pub async fn login(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let request = state.linkedin().authorization_url();
    let session_config = &state.config().session;

    let cookie = Cookie::build((STATE_COOKIE, request.state))
        .path("/")
        .http_only(true)
        .secure(session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(session_config.state_ttl_minutes));

    (jar.add(cookie), found(request.url))
}

/// Completes the login after LinkedIn redirects back.
pub async fn callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
    signed: SignedCookieJar,
    jar: CookieJar,
) -> Result<impl IntoResponse, Rejection> {
    // A query that does not even parse cannot carry a valid state.
    let Query(query) = query.map_err(|e| {
        tracing::debug!(error = %e, "Unparseable callback query");
        Rejection {
            stage: CallbackStage::Start,
            error: GatewayError::InvalidState,
        }
    })?;
    let expected_state = signed.get(STATE_COOKIE).map(|c| c.value().to_string());

    let jar = flow::complete_login(&state, &query, expected_state.as_deref(), jar).await?;
    tracing::debug!(stage = %CallbackStage::CookieSet, "Profile persisted");

    let jar = jar.add(flow::expired_cookie(STATE_COOKIE));
    tracing::info!(stage = %CallbackStage::Redirected, "Login completed");

    Ok((jar, found(state.config().post_login_redirect())))
}

/// Returns the signed-in user's profile.
pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<IdentityProfile>, GatewayError> {
    match state.config().session.storage {
        ProfileStorage::Cookie => {
            let cookie = jar
                .get(PROFILE_COOKIE)
                .filter(|c| !c.value().is_empty())
                .ok_or(GatewayError::NotSignedIn)?;
            let profile = IdentityProfile::from_cookie_value(cookie.value())
                .map_err(|_| GatewayError::MalformedProfile)?;
            Ok(Json(profile))
        }
        ProfileStorage::Server => {
            let session_id = jar
                .get(SESSION_COOKIE)
                .and_then(|c| c.value().parse::<SessionId>().ok())
                .ok_or(GatewayError::NotSignedIn)?;
            let session = state
                .sessions()
                .find_by_id(&session_id)
                .await
                .ok_or(GatewayError::NotSignedIn)?;
            Ok(Json(session.profile().clone()))
        }
    }
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    ok: bool,
}

/// Signs the user out by expiring every cookie the gateway sets.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_id) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<SessionId>().ok())
    {
        state.sessions().delete(&session_id).await;
        tracing::debug!(session_id = %session_id, "Deleted server-side session");
    }

    let jar = jar
        .add(flow::expired_cookie(PROFILE_COOKIE))
        .add(flow::expired_cookie(STATE_COOKIE))
        .add(flow::expired_cookie(SESSION_COOKIE));

    (jar, Json(LogoutResponse { ok: true }))
}
