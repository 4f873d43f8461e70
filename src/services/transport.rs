//! Blocking HTTP transport
//!
//! One JSON POST per call, no retry. The adapter talks to a [`Transport`]
//! so the HTTP layer can be swapped out in tests.

use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
};

use crate::error::{OctoAiError, Result};

/// Sends one JSON request and returns the raw response body
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with `headers`
    ///
    /// # Errors
    ///
    /// Returns [`OctoAiError::Transport`] if the request cannot be sent or
    /// the connection fails
    fn post(&self, url: &str, headers: HeaderMap, body: Vec<u8>) -> Result<String>;
}

/// Build the bearer-token and content-type headers for a request
///
/// # Errors
///
/// Returns [`OctoAiError::InvalidConfig`] if the token is not a valid header value
pub fn request_headers(api_token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut bearer = HeaderValue::from_str(&format!("Bearer {api_token}"))
        .map_err(|_| OctoAiError::InvalidConfig("Invalid API token format".to_string()))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// [`Transport`] backed by a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport; `None` disables the request timeout entirely
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, headers: HeaderMap, body: Vec<u8>) -> Result<String> {
        let response = self.client.post(url).headers(headers).body(body).send()?;

        let status = response.status();
        tracing::debug!(%status, "inference endpoint responded");

        Ok(response.text()?)
    }
}
