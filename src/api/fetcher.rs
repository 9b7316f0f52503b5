//! Bearer-authenticated requests against the SIGVIB API.
//!
//! Every call reads the current token from the credential store first; an
//! absent token fails immediately with `MissingToken` and no network
//! activity. Successful bodies arrive wrapped in a `{result}` envelope,
//! which the fetcher unwraps exactly one level. No retries happen here -
//! retry policy belongs to the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::TokenStore;
use crate::config::{Config, REQUEST_TIMEOUT_SECS};

use super::ApiError;

/// The API's success envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

/// Authorized fetcher for the asset-tracking API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthorizedFetcher {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl AuthorizedFetcher {
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn bearer_token(&self) -> Result<String, ApiError> {
        self.store.load().ok_or(ApiError::MissingToken)
    }

    /// Send one request and return the raw success body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        // Token check precedes any network activity.
        let token = self.bearer_token()?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&token)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, %status, "API response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }
        Ok(text)
    }

    /// Perform a request and unwrap the `{result}` envelope.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, body).await?;
        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            ApiError::Decode(format!("response from {path} is not a valid envelope: {e}"))
        })?;
        Ok(envelope.result)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// GET an endpoint that returns a bare body instead of a `{result}`
    /// envelope. The occupancy summary is the one endpoint shaped this way.
    pub async fn get_unenveloped<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.send(Method::GET, path, None).await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("response from {path} is not valid JSON: {e}")))
    }
}
