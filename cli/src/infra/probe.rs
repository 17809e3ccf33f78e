//! HTTP reachability probe for the desktop gateway.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::redirect;

use crate::application::ports::EndpointProbe;
use crate::domain::QueryError;

/// Timeout of a single probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Production implementation of [`EndpointProbe`].
///
/// Redirects are not followed so an auth redirect (302) is seen as-is.
pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(PROBE_TIMEOUT)
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self { http })
    }
}

impl EndpointProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<u16, QueryError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}
