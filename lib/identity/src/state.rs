//! CSRF state validation for the authorization callback.
//!
//! Every login attempt binds a random state token to the browser through a
//! signed cookie. The IdP echoes the token back on the callback, and the
//! callback is only honoured when both copies agree.

use crate::error::StateError;

/// Number of random bytes in a state token (base64url encoded on the wire).
pub const STATE_TOKEN_BYTES: u32 = 24;

/// Checks a callback's `code` and `state` against the cookie-bound state.
///
/// Empty values count as absent. On success the authorization code is
/// returned, ready to be exchanged.
///
/// # Errors
///
/// Returns the first failed check as a [`StateError`].
pub fn verify_state<'a>(
    code: Option<&'a str>,
    returned_state: Option<&str>,
    cookie_state: Option<&str>,
) -> Result<&'a str, StateError> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(StateError::MissingCode)?;
    let returned_state = returned_state
        .filter(|s| !s.is_empty())
        .ok_or(StateError::MissingState)?;
    let cookie_state = cookie_state
        .filter(|s| !s.is_empty())
        .ok_or(StateError::MissingCookie)?;

    if returned_state != cookie_state {
        return Err(StateError::Mismatch);
    }

    Ok(code)
}
