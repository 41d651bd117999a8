//! HTTP client for the gateway's session endpoints.

use linkedin_signin_core::Result;
use linkedin_signin_identity::IdentityProfile;
use reqwest::header::COOKIE;

use crate::error::ClientError;
use crate::view::ViewState;

/// Asks the gateway who is signed in and tracks the resulting view state.
#[derive(Debug)]
pub struct SessionClient {
    backend: String,
    cookie: Option<String>,
    http_client: reqwest::Client,
    state: ViewState,
}

impl SessionClient {
    /// Creates a client for the gateway at `backend` (e.g. `http://localhost:3001`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBackend`] if `backend` is not an absolute
    /// URL, and [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(backend: &str) -> Result<Self, ClientError> {
        reqwest::Url::parse(backend).map_err(|e| ClientError::InvalidBackend {
            url: backend.to_string(),
            reason: e.to_string(),
        })?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            backend: backend.trim_end_matches('/').to_string(),
            cookie: None,
            http_client,
            state: ViewState::Idle,
        })
    }

    /// Sends `cookie` as the `Cookie` header on every request, the way a
    /// browser would send the gateway's cookies.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into()).filter(|c: &String| !c.is_empty());
        self
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The URL a browser should navigate to in order to sign in.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/auth/linkedin", self.backend)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http_client
            .request(method, format!("{}{path}", self.backend));
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Fetches the current identity and updates the view state.
    ///
    /// Any non-success status means nobody is signed in. Only a failure to
    /// reach the gateway or to decode its answer is an error state.
    pub async fn load(&mut self) -> &ViewState {
        self.state = ViewState::Loading;

        let response = match self.request(reqwest::Method::GET, "/api/me").send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "Identity lookup failed");
                self.state = ViewState::Error(e.to_string());
                return &self.state;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Not signed in");
            self.state = ViewState::Idle;
            return &self.state;
        }

        self.state = match response.json::<IdentityProfile>().await {
            Ok(profile) => ViewState::Authed(profile),
            Err(e) => ViewState::Error(format!("failed to decode profile: {e}")),
        };
        &self.state
    }

    /// Asks the gateway to end the session and resets the view state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the gateway cannot be reached;
    /// the view state is left untouched in that case.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.request(reqwest::Method::POST, "/api/logout")
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                reason: format!("logout request failed: {e}"),
            })?;

        self.state = ViewState::Idle;
        Ok(())
    }
}
