//! HTTP server for SILTA
//!
//! A single `POST /` route that runs the whole translation synchronously:
//! decode the collectd batch, flatten it, encode the series batch, relay it.
//! The handler holds no state beyond the shared relay, so concurrent
//! requests need no coordination.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use tracing::debug;

use crate::error::Result;
use crate::relay::InfluxRelay;
use crate::sample;
use crate::series::SeriesBatch;
use crate::translate;

/// Port the inbound listener always binds
pub const LISTEN_PORT: u16 = 8079;

/// Build the application router around a shared relay
pub fn router(relay: Arc<InfluxRelay>) -> Router {
    Router::new()
        .route("/", post(translate_batch))
        .with_state(relay)
}

/// Address the inbound listener binds
pub fn listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], LISTEN_PORT))
}

/// Handler for one collectd batch: decode, flatten, encode, relay.
///
/// Fault mapping happens in the error type: decode and shape faults answer
/// 400, relay transport faults 502. A fault aborts this request only.
async fn translate_batch(
    State(relay): State<Arc<InfluxRelay>>,
    body: Bytes,
) -> Result<StatusCode> {
    debug!(body = %String::from_utf8_lossy(&body), "Inbound batch");

    let samples = sample::decode(&body)?;
    debug!(samples = samples.len(), decoded = ?samples, "Decoded batch");

    let points = translate::flatten(&samples)?;
    let batch = SeriesBatch::from_points(points);

    relay.send(&batch).await?;

    Ok(StatusCode::OK)
}
