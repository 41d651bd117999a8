//! Shared application state and the router.

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{self, LinkedInClient, SessionStore};
use crate::config::GatewayConfig;
use crate::error::StartupError;

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_SECRET_BYTES: usize = 64;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<GatewayConfig>,
    linkedin: Arc<LinkedInClient>,
    sessions: SessionStore,
    cookie_key: Key,
    allowed_origin: HeaderValue,
}

impl AppState {
    /// Creates the application state from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails if the signing secret is shorter than [`MIN_SECRET_BYTES`], the
    /// frontend origin is not a valid header value, or the provider
    /// endpoints are not valid URLs.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        let secret = config.app_session_secret.as_bytes();
        if secret.len() < MIN_SECRET_BYTES {
            return Err(StartupError::SigningSecretTooShort {
                length: secret.len(),
            });
        }
        let cookie_key = Key::from(secret);

        let allowed_origin = HeaderValue::from_str(config.frontend_origin()).map_err(|e| {
            StartupError::InvalidFrontendOrigin {
                origin: config.frontend_origin.clone(),
                reason: e.to_string(),
            }
        })?;

        let linkedin = LinkedInClient::new(&config.linkedin)?;

        Ok(Self {
            config: Arc::new(config),
            linkedin: Arc::new(linkedin),
            sessions: SessionStore::new(),
            cookie_key,
            allowed_origin,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    #[must_use]
    pub fn linkedin(&self) -> &LinkedInClient {
        &self.linkedin
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Builds the gateway router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/auth/linkedin", get(auth::login))
        .route("/auth/linkedin/callback", get(auth::callback))
        .route("/api/me", get(auth::me))
        .route("/api/logout", post(auth::logout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
