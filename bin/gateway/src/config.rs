//! Centralized gateway configuration.
//!
//! This module provides strongly-typed configuration for the gateway,
//! loaded via the `config` crate from environment variables. Nested fields
//! use `__` as the separator:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `FRONTEND_ORIGIN` | Origin of the frontend; CORS allow-list and post-login redirect |
//! | `APP_SESSION_SECRET` | Cookie signing key, at least 64 bytes |
//! | `HOST`, `PORT` | Listen address (default `0.0.0.0:3001`) |
//! | `LINKEDIN__CLIENT_ID`, `LINKEDIN__CLIENT_SECRET`, `LINKEDIN__REDIRECT_URI` | LinkedIn app registration |
//! | `SESSION__STORAGE` | `cookie` (default) or `server` |
//! | `SESSION__SECURE_COOKIES` | `true` (default); set `false` for plain-HTTP local development |
//!
//! The flat names `LINKEDIN_CLIENT_ID`, `LINKEDIN_CLIENT_SECRET` and
//! `LINKEDIN_REDIRECT_URI` are also accepted. When both spellings are set,
//! the nested one wins.
//!
//! See [`ProviderConfig`] and [`SessionConfig`] for the optional fields.

use linkedin_signin_identity::ProviderConfig;
use serde::Deserialize;
use std::fmt;

/// Gateway configuration composed from library configs.
#[derive(Deserialize)]
pub struct GatewayConfig {
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin of the frontend application (e.g., "http://localhost:5173").
    pub frontend_origin: String,

    /// Secret used to sign the CSRF state cookie.
    pub app_session_secret: String,

    /// LinkedIn OAuth client configuration.
    pub linkedin: ProviderConfig,

    /// Session and cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the signed-in user's profile is kept between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStorage {
    /// Serialized into the script-readable `li_profile` cookie.
    #[default]
    Cookie,
    /// Held in the gateway's memory; the browser only gets a session ID.
    Server,
}

/// Cookie and server-side session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub storage: ProfileStorage,

    /// Lifetime of server-side sessions, in minutes.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,

    /// Interval between expired-session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Sets the Secure flag on every cookie. Turn off for plain-HTTP local development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// How long a login attempt's state cookie stays valid, in minutes.
    #[serde(default = "default_state_ttl_minutes")]
    pub state_ttl_minutes: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_duration_minutes() -> i64 {
    60
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

fn default_state_ttl_minutes() -> i64 {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: ProfileStorage::default(),
            duration_minutes: default_duration_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
            state_ttl_minutes: default_state_ttl_minutes(),
        }
    }
}

/// Flat variable names accepted for the nested LinkedIn settings.
const FLAT_ALIASES: [(&str, &str); 3] = [
    ("LINKEDIN_CLIENT_ID", "linkedin.client_id"),
    ("LINKEDIN_CLIENT_SECRET", "linkedin.client_secret"),
    ("LINKEDIN_REDIRECT_URI", "linkedin.redirect_uri"),
];

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    fn from_vars(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        for (flat, key) in FLAT_ALIASES {
            if let Some(value) = vars.get(flat) {
                builder = builder.set_default(key, value.as_str())?;
            }
        }

        builder
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the address to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the frontend origin without a trailing slash.
    #[must_use]
    pub fn frontend_origin(&self) -> &str {
        self.frontend_origin.trim_end_matches('/')
    }

    /// Returns where the browser is sent after a successful login.
    #[must_use]
    pub fn post_login_redirect(&self) -> String {
        format!("{}/", self.frontend_origin())
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("frontend_origin", &self.frontend_origin)
            .field("app_session_secret", &"<redacted>")
            .field("linkedin", &self.linkedin)
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "frontend_origin": "http://localhost:5173/",
            "app_session_secret": "s".repeat(64),
            "linkedin": {
                "client_id": "client-id",
                "client_secret": "client-secret",
                "redirect_uri": "http://localhost:3001/auth/linkedin/callback"
            }
        })
    }

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.storage, ProfileStorage::Cookie);
        assert_eq!(config.duration_minutes, 60);
        assert_eq!(config.cleanup_interval_seconds, 300);
        assert!(config.secure_cookies);
        assert_eq!(config.state_ttl_minutes, 10);
    }

    #[test]
    fn gateway_config_deserializes_with_defaults() {
        let config: GatewayConfig = serde_json::from_value(minimal()).expect("deserialize");

        assert_eq!(config.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.frontend_origin(), "http://localhost:5173");
        assert_eq!(config.post_login_redirect(), "http://localhost:5173/");
        assert_eq!(config.linkedin.client_id(), "client-id");
        assert_eq!(config.session.storage, ProfileStorage::Cookie);
    }

    #[test]
    fn storage_mode_parses_lowercase() {
        let mut value = minimal();
        value["session"] = serde_json::json!({ "storage": "server", "secure_cookies": false });

        let config: GatewayConfig = serde_json::from_value(value).expect("deserialize");
        assert_eq!(config.session.storage, ProfileStorage::Server);
        assert!(!config.session.secure_cookies);
        assert_eq!(config.session.duration_minutes, 60);
    }

    #[test]
    fn missing_client_registration_is_an_error() {
        let mut value = minimal();
        value.as_object_mut().expect("object").remove("linkedin");
        assert!(serde_json::from_value::<GatewayConfig>(value).is_err());
    }

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn loads_nested_variables() {
        let config = GatewayConfig::from_vars(vars(&[
            ("FRONTEND_ORIGIN", "http://localhost:5173"),
            ("APP_SESSION_SECRET", &"s".repeat(64)),
            ("LINKEDIN__CLIENT_ID", "client-id"),
            ("LINKEDIN__CLIENT_SECRET", "client-secret"),
            ("LINKEDIN__REDIRECT_URI", "http://localhost:3001/auth/linkedin/callback"),
            ("SESSION__SECURE_COOKIES", "false"),
            ("PORT", "4000"),
        ]))
        .expect("load");

        assert_eq!(config.bind_address(), "0.0.0.0:4000");
        assert_eq!(config.linkedin.client_id(), "client-id");
        assert!(!config.session.secure_cookies);
    }

    #[test]
    fn flat_linkedin_variables_are_accepted() {
        let config = GatewayConfig::from_vars(vars(&[
            ("FRONTEND_ORIGIN", "http://localhost:5173"),
            ("APP_SESSION_SECRET", &"s".repeat(64)),
            ("LINKEDIN_CLIENT_ID", "flat-id"),
            ("LINKEDIN_CLIENT_SECRET", "flat-secret"),
            ("LINKEDIN_REDIRECT_URI", "http://localhost:3001/auth/linkedin/callback"),
        ]))
        .expect("load");

        assert_eq!(config.linkedin.client_id(), "flat-id");
        assert!(config.session.secure_cookies);
    }

    #[test]
    fn nested_variables_take_precedence_over_flat_ones() {
        let config = GatewayConfig::from_vars(vars(&[
            ("FRONTEND_ORIGIN", "http://localhost:5173"),
            ("APP_SESSION_SECRET", &"s".repeat(64)),
            ("LINKEDIN_CLIENT_ID", "flat-id"),
            ("LINKEDIN__CLIENT_ID", "nested-id"),
            ("LINKEDIN_CLIENT_SECRET", "flat-secret"),
            ("LINKEDIN_REDIRECT_URI", "http://localhost:3001/auth/linkedin/callback"),
        ]))
        .expect("load");

        assert_eq!(config.linkedin.client_id(), "nested-id");
    }

    #[test]
    fn missing_variables_fail_to_load() {
        assert!(GatewayConfig::from_vars(vars(&[("FRONTEND_ORIGIN", "http://localhost:5173")])).is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config: GatewayConfig = serde_json::from_value(minimal()).expect("deserialize");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(&"s".repeat(64)));
        assert!(!rendered.contains("client-secret"));
    }
}
