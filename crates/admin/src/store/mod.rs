//! HTTP client for the shop's record store.
//!
//! The store is a small JSON server exposing one collection per item type:
//!
//! - `GET /{type}` - list records
//! - `GET /{type}/{id}` - one record
//! - `POST /{type}` - create, the store assigns the id
//! - `PUT /{type}/{id}` - replace the fields of a record
//! - `DELETE /{type}/{id}` - remove a record
//!
//! Writes require `Authorization: Bearer <key>`. The client sends the key on
//! every request, reads included.

mod records;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::warn;
use url::Url;
use zia_mia_core::DataAccessError;

use crate::config::StoreConfig;

/// Errors that can occur when talking to the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a URL or response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unauthorized (missing or wrong API key).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<StoreError> for DataAccessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Http(e) => Self::Transport(e.to_string()),
            StoreError::Api { status, message } => Self::Status { status, message },
            StoreError::NotFound(path) => Self::Status {
                status: 404,
                message: path,
            },
            StoreError::Parse(message) => Self::Decode(message),
            StoreError::Unauthorized(_) => Self::Unauthorized,
        }
    }
}

/// Record store client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl StoreClient {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StoreError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(StoreClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Root URL of the store.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| StoreError::Parse(format!("Invalid path {path}: {e}")))
    }

    /// Execute a GET request against the store.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, StoreError> {
        let response = self.inner.client.get(self.url(path)?).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request against the store.
    pub(crate) async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .inner
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request against the store.
    pub(crate) async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .inner
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request against the store.
    pub(crate) async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let response = self.inner.client.delete(self.url(path)?).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Handle a store response and parse its JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| StoreError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Turn a non-2xx response into a [`StoreError`].
    async fn parse_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let url = response.url().path().to_string();

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        warn!(status, %url, %message, "store request failed");

        match status {
            401 | 403 => StoreError::Unauthorized(message),
            404 => StoreError::NotFound(url),
            _ => StoreError::Api { status, message },
        }
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
