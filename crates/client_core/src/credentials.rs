//! Explicit credentials attached to every backend request.

use reqwest::{header, RequestBuilder};
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone, Default)]
pub struct CredentialContext {
    /// Raw `Cookie` header value, e.g. `session=abc123`.
    session_cookie: Option<Secret<String>>,
    bearer_token: Option<Secret<String>>,
}

impl CredentialContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(Secret::new(cookie.into()));
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(Secret::new(token.into()));
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.session_cookie.is_none() && self.bearer_token.is_none()
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(cookie) = &self.session_cookie {
            request = request.header(header::COOKIE, cookie.expose_secret().as_str());
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token.expose_secret());
        }
        request
    }
}
