//! HTTP client for the climbing backend.
//!
//! Speaks JSON over HTTPS with cookie-based session auth; the cookie store
//! attaches credentials to every request. Transport failures map to
//! `BelayError::Network`, server rejections to `BelayError::Api`, so callers
//! can tell retryable commits apart from local problems.

use async_trait::async_trait;
use belay_core::error::{BelayError, Result};
use belay_core::grades::GradeSystemEntry;
use belay_core::repository::ClimbApi;
use belay_core::wire::{CommitAck, CommitSessionPayload};
use reqwest::Client;

/// reqwest-backed implementation of [`ClimbApi`].
#[derive(Clone)]
pub struct HttpClimbApi {
    client: Client,
    base_url: String,
}

impl HttpClimbApi {
    /// Creates a client for the given server base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| BelayError::internal(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn map_send_error(err: reqwest::Error) -> BelayError {
        if err.is_connect() || err.is_timeout() {
            BelayError::network(
                "Unable to reach the server. Check your connection and try again.",
            )
        } else {
            BelayError::network(format!("Request failed: {err}"))
        }
    }
}

#[async_trait]
impl ClimbApi for HttpClimbApi {
    async fn fetch_grade_systems(&self) -> Result<Vec<GradeSystemEntry>> {
        let response = self
            .client
            .get(self.url("/api/grades"))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BelayError::api(format!(
                "Grade catalog request failed with status {status}"
            )));
        }

        let entries: Vec<GradeSystemEntry> = response
            .json()
            .await
            .map_err(|err| BelayError::api(format!("Malformed grade catalog response: {err}")))?;

        tracing::debug!(systems = entries.len(), "Fetched grade catalog");
        Ok(entries)
    }

    async fn commit_session(&self, payload: &CommitSessionPayload) -> Result<CommitAck> {
        let response = self
            .client
            .post(self.url("/api/commit-session"))
            .json(payload)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        let ack: CommitAck = response.json().await.map_err(|err| {
            BelayError::api(format!(
                "Malformed commit response (status {status}): {err}"
            ))
        })?;

        if !status.is_success() || !ack.ok {
            let message = ack
                .error
                .unwrap_or_else(|| format!("Commit rejected with status {status}"));
            return Err(BelayError::api(message));
        }

        tracing::info!(session_id = ?ack.session_id, "Session committed");
        Ok(ack)
    }
}
