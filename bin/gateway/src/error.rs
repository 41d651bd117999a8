//! Error types for the gateway.
//!
//! `GatewayError` is what a request handler fails with; its `IntoResponse`
//! impl decides the status code and body the browser sees. `StartupError`
//! covers configuration problems detected before the listener is bound.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use linkedin_signin_identity::{ProfileError, StateError};
use rootcause::Report;
use serde::Serialize;
use std::fmt;

use crate::auth::linkedin::IdpError;

/// Request-level failures of the gateway.
#[derive(Debug)]
pub enum GatewayError {
    /// The callback's state did not match the cookie, or parameters were missing.
    InvalidState,
    /// The token endpoint answered with a non-success status.
    TokenExchangeFailed { body: String },
    /// The userinfo endpoint answered with a non-success status.
    UserinfoFailed { body: String },
    /// Anything unexpected while completing a login.
    ServerError { message: String },
    /// No profile is associated with the request.
    NotSignedIn,
    /// The profile cookie could not be decoded.
    MalformedProfile,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState => write!(f, "invalid login state"),
            Self::TokenExchangeFailed { body } => write!(f, "token exchange failed: {body}"),
            Self::UserinfoFailed { body } => write!(f, "userinfo request failed: {body}"),
            Self::ServerError { message } => write!(f, "server error: {message}"),
            Self::NotSignedIn => write!(f, "not signed in"),
            Self::MalformedProfile => write!(f, "malformed profile cookie"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<StateError> for GatewayError {
    fn from(_: StateError) -> Self {
        Self::InvalidState
    }
}

impl From<IdpError> for GatewayError {
    fn from(err: IdpError) -> Self {
        match err {
            IdpError::TokenRejected { body } => Self::TokenExchangeFailed { body },
            IdpError::UserinfoRejected { body, .. } => Self::UserinfoFailed { body },
            other => Self::ServerError {
                message: other.to_string(),
            },
        }
    }
}

impl From<Report<ProfileError>> for GatewayError {
    fn from(report: Report<ProfileError>) -> Self {
        Self::ServerError {
            message: report.to_string(),
        }
    }
}

/// JSON error body for the `/api` routes.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidState => {
                (StatusCode::BAD_REQUEST, "Invalid state. Please try again.").into_response()
            }
            Self::TokenExchangeFailed { body } => {
                tracing::error!(upstream = %body, "Token exchange failed");
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Token exchange failed: {body}"),
                )
                    .into_response()
            }
            Self::UserinfoFailed { body } => {
                tracing::error!(upstream = %body, "Userinfo request failed");
                (StatusCode::BAD_GATEWAY, format!("Userinfo failed: {body}")).into_response()
            }
            Self::ServerError { message } => {
                tracing::error!(error = %message, "Login failed unexpectedly");
                let message = if message.is_empty() {
                    "Server error".to_string()
                } else {
                    message
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            Self::NotSignedIn => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "Not signed in",
                }),
            )
                .into_response(),
            Self::MalformedProfile => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Bad profile cookie",
                }),
            )
                .into_response(),
        }
    }
}

/// Problems that prevent the gateway from starting.
#[derive(Debug)]
pub enum StartupError {
    /// `APP_SESSION_SECRET` is too short to be used as a signing key.
    SigningSecretTooShort { length: usize },
    /// `FRONTEND_ORIGIN` cannot be used as a CORS origin.
    InvalidFrontendOrigin { origin: String, reason: String },
    /// The identity provider configuration is unusable.
    Provider(IdpError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigningSecretTooShort { length } => write!(
                f,
                "APP_SESSION_SECRET must be at least 64 bytes long (got {length})"
            ),
            Self::InvalidFrontendOrigin { origin, reason } => {
                write!(f, "invalid frontend origin '{origin}': {reason}")
            }
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<IdpError> for StartupError {
    fn from(err: IdpError) -> Self {
        Self::Provider(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn invalid_state_is_plain_text_400() {
        let response = GatewayError::InvalidState.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid state. Please try again.");
    }

    #[tokio::test]
    async fn upstream_failures_are_502_with_upstream_body() {
        let response = GatewayError::TokenExchangeFailed {
            body: r#"{"error":"invalid_client"}"#.to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_text(response).await,
            r#"Token exchange failed: {"error":"invalid_client"}"#
        );

        let response = GatewayError::UserinfoFailed {
            body: "revoked".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_text(response).await, "Userinfo failed: revoked");
    }

    #[tokio::test]
    async fn server_error_falls_back_to_generic_message() {
        let response = GatewayError::ServerError {
            message: String::new(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Server error");
    }

    #[tokio::test]
    async fn api_errors_are_json() {
        let response = GatewayError::NotSignedIn.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, r#"{"error":"Not signed in"}"#);

        let response = GatewayError::MalformedProfile.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, r#"{"error":"Bad profile cookie"}"#);
    }

    #[test]
    fn idp_errors_map_to_the_right_kind() {
        let token = GatewayError::from(IdpError::TokenRejected {
            body: "nope".to_string(),
        });
        assert!(matches!(token, GatewayError::TokenExchangeFailed { .. }));

        let userinfo = GatewayError::from(IdpError::UserinfoRejected {
            status: 401,
            body: "nope".to_string(),
        });
        assert!(matches!(userinfo, GatewayError::UserinfoFailed { .. }));

        let transport = GatewayError::from(IdpError::Transport {
            reason: "connection refused".to_string(),
        });
        assert!(matches!(transport, GatewayError::ServerError { .. }));
    }
}
