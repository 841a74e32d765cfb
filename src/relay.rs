//! Outbound delivery to InfluxDB
//!
//! One POST per inbound request, fire-and-forget: the destination's status
//! and body are read for diagnostics only and never decide the inbound
//! request's outcome. Only a transport-level fault (connect, timeout, send)
//! is surfaced to the caller.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{Result, SiltaError};
use crate::series::SeriesBatch;

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 30;
/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Relays encoded batches to the configured series endpoint
pub struct InfluxRelay {
    client: Client,
    url: String,
}

impl InfluxRelay {
    /// Build a relay for the given series URL, assembled once at startup
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(SiltaError::Relay)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Destination URL this relay posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one batch, wrapped in the single-element list the series API takes.
    ///
    /// Returns `Ok` once the request has been issued and answered at the
    /// transport level, whatever status the destination chose to return.
    pub async fn send(&self, batch: &SeriesBatch) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&[batch])
            .send()
            .await
            .map_err(SiltaError::Relay)?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(url = %self.url, rows = batch.len(), %status, body = %body, "Batch relayed");
        } else {
            // Fire-and-forget: logged, never propagated
            let body = response.text().await.unwrap_or_default();
            warn!(url = %self.url, %status, body = %body, "InfluxDB rejected batch");
        }

        Ok(())
    }
}
