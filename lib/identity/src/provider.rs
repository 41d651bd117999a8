//! Identity provider configuration.
//!
//! The defaults point at LinkedIn's OAuth 2.0 / OpenID Connect endpoints.
//! Every endpoint can be overridden, which is how tests aim the gateway at a
//! local mock server.

use serde::{Deserialize, Serialize};
use std::fmt;

/// LinkedIn's authorization endpoint.
pub const LINKEDIN_AUTHORIZATION_ENDPOINT: &str = "https://www.linkedin.com/oauth/v2/authorization";

/// LinkedIn's token endpoint.
pub const LINKEDIN_TOKEN_ENDPOINT: &str = "https://www.linkedin.com/oauth/v2/accessToken";

/// LinkedIn's OIDC userinfo endpoint.
pub const LINKEDIN_USERINFO_ENDPOINT: &str = "https://api.linkedin.com/v2/userinfo";

/// Configuration for the identity provider.
///
/// Only the client registration is required; everything else defaults to
/// LinkedIn's values.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Client ID of the LinkedIn app.
    client_id: String,
    /// Client secret of the LinkedIn app. Never logged.
    client_secret: String,
    /// The redirect URI registered for the callback
    /// (e.g., "http://localhost:3001/auth/linkedin/callback").
    redirect_uri: String,
    /// Comma-separated scopes (default "openid,profile,email").
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Value of the `prompt` authorization parameter; empty to omit it.
    /// Default: "login", which forces re-authentication on every sign-in.
    #[serde(default = "default_prompt")]
    prompt: String,
    #[serde(default = "default_authorization_endpoint")]
    authorization_endpoint: String,
    #[serde(default = "default_token_endpoint")]
    token_endpoint: String,
    #[serde(default = "default_userinfo_endpoint")]
    userinfo_endpoint: String,
}

fn default_scopes() -> String {
    "openid,profile,email".to_string()
}

fn default_prompt() -> String {
    "login".to_string()
}

fn default_authorization_endpoint() -> String {
    LINKEDIN_AUTHORIZATION_ENDPOINT.to_string()
}

fn default_token_endpoint() -> String {
    LINKEDIN_TOKEN_ENDPOINT.to_string()
}

fn default_userinfo_endpoint() -> String {
    LINKEDIN_USERINFO_ENDPOINT.to_string()
}

impl ProviderConfig {
    /// Creates a configuration for LinkedIn with defaults for optional fields.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        ProviderConfigBuilder::new(client_id, client_secret, redirect_uri).build()
    }

    /// Starts a builder for non-default scopes, prompt or endpoints.
    #[must_use]
    pub fn builder(
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> ProviderConfigBuilder {
        ProviderConfigBuilder::new(client_id, client_secret, redirect_uri)
    }

    /// Returns the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the callback URI registered with LinkedIn.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the `prompt` parameter, if one should be sent.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        Some(self.prompt.trim()).filter(|p| !p.is_empty())
    }

    #[must_use]
    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    #[must_use]
    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    #[must_use]
    pub fn userinfo_endpoint(&self) -> &str {
        &self.userinfo_endpoint
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("prompt", &self.prompt)
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("userinfo_endpoint", &self.userinfo_endpoint)
            .finish()
    }
}

/// Builder for `ProviderConfig`.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    prompt: String,
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl ProviderConfigBuilder {
    /// Creates a builder targeting LinkedIn with the default scopes.
    #[must_use]
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes: vec![
                "openid".to_string(),
                "profile".to_string(),
                "email".to_string(),
            ],
            prompt: default_prompt(),
            authorization_endpoint: default_authorization_endpoint(),
            token_endpoint: default_token_endpoint(),
            userinfo_endpoint: default_userinfo_endpoint(),
        }
    }

    /// Sets the `prompt` parameter; an empty string omits it.
    #[must_use]
    pub fn prompt(mut self, prompt: String) -> Self {
        self.prompt = prompt;
        self
    }

    /// Points all three endpoints at `base`, using LinkedIn's paths.
    #[must_use]
    pub fn endpoints_at(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.authorization_endpoint = format!("{base}/oauth/v2/authorization");
        self.token_endpoint = format!("{base}/oauth/v2/accessToken");
        self.userinfo_endpoint = format!("{base}/v2/userinfo");
        self
    }

    /// Builds the `ProviderConfig`.
    #[must_use]
    pub fn build(self) -> ProviderConfig {
        ProviderConfig {
            client_id: self.client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes.join(","),
            prompt: self.prompt,
            authorization_endpoint: self.authorization_endpoint,
            token_endpoint: self.token_endpoint,
            userinfo_endpoint: self.userinfo_endpoint,
        }
    }
}
