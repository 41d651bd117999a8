//! LinkedIn OAuth 2.0 / OpenID Connect client.
//!
//! Builds the authorization redirect, exchanges authorization codes for
//! access tokens, and fetches userinfo claims. The two outbound calls are
//! made with a single pooled HTTP client that never follows redirects.

use linkedin_signin_identity::{ProviderConfig, STATE_TOKEN_BYTES, UserinfoClaims};
use oauth2::{
    AccessToken, AsyncHttpClient, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret,
    CsrfToken, HttpRequest, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
    basic::BasicClient,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

/// Client for LinkedIn's authorization, token and userinfo endpoints.
pub struct LinkedInClient {
    client_id: ClientId,
    client_secret: ClientSecret,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
    userinfo_url: reqwest::Url,
    scopes: Vec<Scope>,
    prompt: Option<String>,
    http_client: reqwest::Client,
}

/// A freshly built authorization redirect and the state it carries.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Where to send the browser.
    pub url: String,
    /// The CSRF state token embedded in `url`.
    pub state: String,
}

impl LinkedInClient {
    /// Creates a client from the provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::Configuration`] if an endpoint or the redirect URI
    /// is not a valid URL, or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, IdpError> {
        let auth_url = AuthUrl::new(config.authorization_endpoint().to_string())
            .map_err(|e| IdpError::Configuration(format!("invalid authorization URL: {e}")))?;
        let token_url = TokenUrl::new(config.token_endpoint().to_string())
            .map_err(|e| IdpError::Configuration(format!("invalid token URL: {e}")))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| IdpError::Configuration(format!("invalid redirect URI: {e}")))?;
        let userinfo_url = reqwest::Url::parse(config.userinfo_endpoint())
            .map_err(|e| IdpError::Configuration(format!("invalid userinfo URL: {e}")))?;

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| IdpError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client_id: ClientId::new(config.client_id().to_string()),
            client_secret: ClientSecret::new(config.client_secret().to_string()),
            auth_url,
            token_url,
            redirect_url,
            userinfo_url,
            scopes: config
                .scopes()
                .into_iter()
                .map(|s| Scope::new(s.to_string()))
                .collect(),
            prompt: config.prompt().map(str::to_string),
            http_client,
        })
    }

    /// Generates the authorization URL with a new random state token.
    pub fn authorization_url(&self) -> AuthorizationRequest {
        let client = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        let mut auth_request = client
            .authorize_url(|| CsrfToken::new_random_len(STATE_TOKEN_BYTES))
            .add_scopes(self.scopes.iter().cloned());

        if let Some(prompt) = &self.prompt {
            auth_request = auth_request.add_extra_param("prompt", prompt.clone());
        }

        let (auth_url, csrf_token) = auth_request.url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            state: csrf_token.secret().clone(),
        }
    }

    /// Exchanges the authorization code for an access token.
    ///
    /// The client credentials travel in the form body, as LinkedIn expects.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::TokenRejected`] with the upstream body when the
    /// token endpoint answers with an error status, [`IdpError::InvalidResponse`]
    /// when it answers 200 with something other than a token, and
    /// [`IdpError::Transport`] when it cannot be reached.
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken, IdpError> {
        let client = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        // oauth2 reports undecodable bodies the same way for every status,
        // so the status is recorded on the way through.
        let status = Arc::new(AtomicU16::new(0));
        let status_handle = Arc::clone(&status);
        let http_client = self.http_client.clone();
        let recording_client = move |request: HttpRequest| {
            let status = Arc::clone(&status_handle);
            let http_client = http_client.clone();
            async move {
                let result = http_client.call(request).await;
                if let Ok(response) = &result {
                    status.store(response.status().as_u16(), Ordering::Relaxed);
                }
                result
            }
        };

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&recording_client)
            .await
            .map_err(|e| {
                let succeeded = status.load(Ordering::Relaxed) == 200;
                match e {
                    RequestTokenError::ServerResponse(response) => IdpError::TokenRejected {
                        body: serde_json::to_string(&response)
                            .unwrap_or_else(|_| response.to_string()),
                    },
                    RequestTokenError::Parse(err, _) if succeeded => IdpError::InvalidResponse {
                        reason: format!("failed to decode token response: {err}"),
                    },
                    RequestTokenError::Parse(_, body) => IdpError::TokenRejected {
                        body: String::from_utf8_lossy(&body).into_owned(),
                    },
                    RequestTokenError::Other(message) if succeeded => IdpError::InvalidResponse {
                        reason: format!("unusable token response: {message}"),
                    },
                    RequestTokenError::Other(message) => IdpError::TokenRejected { body: message },
                    RequestTokenError::Request(err) => IdpError::Transport {
                        reason: format!("token endpoint unreachable: {err}"),
                    },
                }
            })?;

        Ok(token_response.access_token().clone())
    }

    /// Fetches the OIDC userinfo claims for the bearer of `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`IdpError::UserinfoRejected`] on a non-success status,
    /// [`IdpError::Transport`] if the endpoint cannot be reached, and
    /// [`IdpError::InvalidResponse`] if the claims cannot be decoded.
    pub async fn fetch_userinfo(&self, access_token: &AccessToken) -> Result<UserinfoClaims, IdpError> {
        let response = self
            .http_client
            .get(self.userinfo_url.clone())
            .bearer_auth(access_token.secret())
            .send()
            .await
            .map_err(|e| IdpError::Transport {
                reason: format!("userinfo endpoint unreachable: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdpError::UserinfoRejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<UserinfoClaims>()
            .await
            .map_err(|e| IdpError::InvalidResponse {
                reason: format!("failed to decode userinfo claims: {e}"),
            })
    }
}

/// Identity provider errors.
#[derive(Debug)]
pub enum IdpError {
    /// An endpoint or the redirect URI is not a usable URL.
    Configuration(String),
    /// The token endpoint refused the code exchange.
    TokenRejected { body: String },
    /// The userinfo endpoint refused the access token.
    UserinfoRejected { status: u16, body: String },
    /// The provider could not be reached.
    Transport { reason: String },
    /// The provider answered with something that could not be decoded.
    InvalidResponse { reason: String },
}

impl std::fmt::Display for IdpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "identity provider configuration error: {msg}"),
            Self::TokenRejected { body } => write!(f, "token exchange rejected: {body}"),
            Self::UserinfoRejected { status, body } => {
                write!(f, "userinfo request rejected with status {status}: {body}")
            }
            Self::Transport { reason } => write!(f, "{reason}"),
            Self::InvalidResponse { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for IdpError {}
