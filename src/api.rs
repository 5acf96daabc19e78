//! Load-optimizer HTTP API.
//!
//! [`DeckApi`] is the boundary the session talks through; [`HttpApi`] is the
//! `reqwest` implementation. Response parsing is kept in plain functions so it
//! can be tested without a server.

use std::time::Duration;

use deck::model::{Item, ItemId, LoadSnapshot, NewItem};
use tracing::info;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, I/O, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A success response body could not be decoded.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Operations the optimizer server exposes.
#[async_trait::async_trait]
pub trait DeckApi: Send + Sync {
    /// Run the optimizer and return the resulting load plan.
    async fn optimize(&self) -> Result<LoadSnapshot, ApiError>;

    /// Create an item; returns the item as stored.
    async fn add_item(&self, item: &NewItem) -> Result<Item, ApiError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `ClientBuild` if the TLS backend cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Send `request`; the body of a success response, or a `Status` error.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        check_status(status, text)
    }
}

#[async_trait::async_trait]
impl DeckApi for HttpApi {
    async fn optimize(&self) -> Result<LoadSnapshot, ApiError> {
        let body = self.send(self.http.post(self.url("/api/optimize"))).await?;
        let snapshot = LoadSnapshot::from_json(&body)?;
        info!(items = snapshot.items.len(), unplaced = snapshot.unplaced_items.len(), "optimize complete");
        Ok(snapshot)
    }

    async fn add_item(&self, item: &NewItem) -> Result<Item, ApiError> {
        let body = self.send(self.http.post(self.url("/api/items")).json(item)).await?;
        let created: Item = serde_json::from_str(&body)?;
        info!(id = created.id, "item created");
        Ok(created)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(&format!("/api/items/{id}")))).await?;
        info!(id, "item deleted");
        Ok(())
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Join the API root and a path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Pass a 2xx body through; turn anything else into `ApiError::Status`.
///
/// # Errors
///
/// Returns `Status` for non-2xx codes.
pub fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }
    Err(ApiError::Status { status, message: error_message(status, &body) })
}

/// The server's `error` field, or a generic message naming the status.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.trim().is_empty() => parsed.error,
        _ => format!("HTTP error: {status}"),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
