//! Gauntlet HTTP Client
//!
//! A typed HTTP client for the challenge platform API.
//!
//! This crate covers the calls the evaluation worker makes against the
//! platform: receiving and deleting submission queue messages, fetching
//! submissions and challenge phases, and pushing submission status updates.
//!
//! # Example
//!
//! ```no_run
//! use gauntlet_client::PlatformClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PlatformClient::new(
//!         "https://eval.example.org",
//!         "secret-token",
//!         "vision-challenge-queue",
//!         42,
//!     );
//!
//!     let message = client.get_queue_message().await?;
//!     if let Some(body) = message.body {
//!         println!("submission {} is waiting", body.submission_pk);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
mod phases;
mod queue;
mod submissions;

// Re-export commonly used types
pub use api::PlatformApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the challenge platform API
///
/// The client holds the queue coordinates the worker was launched with, so
/// queue calls need no per-call parameters; submission and phase calls take
/// the primary keys carried by each queue message. Every request is sent
/// with the platform API token as a bearer credential.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    /// Base URL of the platform (e.g., "https://eval.example.org")
    base_url: String,
    /// Platform API token
    auth_token: String,
    /// Name of the submission queue this worker consumes
    queue_name: String,
    /// Challenge the queue belongs to
    challenge_pk: u64,
    /// HTTP client instance
    client: Client,
}

impl PlatformClient {
    /// Create a new platform client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the platform API
    /// * `auth_token` - API token sent as a bearer credential
    /// * `queue_name` - Submission queue to consume
    /// * `challenge_pk` - Challenge the queue belongs to
    pub fn new(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        queue_name: impl Into<String>,
        challenge_pk: u64,
    ) -> Self {
        Self::with_client(base_url, auth_token, queue_name, challenge_pk, Client::new())
    }

    /// Create a new platform client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use gauntlet_client::PlatformClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PlatformClient::with_client(
    ///     "https://eval.example.org",
    ///     "secret-token",
    ///     "vision-challenge-queue",
    ///     42,
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        queue_name: impl Into<String>,
        challenge_pk: u64,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
            queue_name: queue_name.into(),
            challenge_pk,
            client,
        }
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the queue name this client consumes
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Get the challenge this client was launched for
    pub fn challenge_pk(&self) -> u64 {
        self.challenge_pk
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
