//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs, attaching the
//! bearer token and decoding responses.

use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::system::auth::storage;

/// Failure of a single HTTP call against the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to serialize request: {0}")]
    Encode(String),
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Request failed with status {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Get the base URL for API requests
///
/// `API_BASE_URL` set at build time wins. Otherwise the URL is derived from
/// the current window location, using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://shop.example.com"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(configured) = option_env!("API_BASE_URL") {
        return configured.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/orders/123");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Attach `Authorization: Bearer ...` when a session token is stored
pub fn authorized(request: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
        None => request,
    }
}

/// Reject non-2xx responses and decode the JSON body
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
