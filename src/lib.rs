//! SILTA - collectd to InfluxDB translation relay
//!
//! A stateless HTTP adapter that accepts collectd `write_http` JSON batches,
//! flattens each sample's multi-valued measurement into scalar points with
//! dotted metric keys, and forwards one InfluxDB series batch per inbound
//! request.
//!
//! # Architecture
//!
//! ```text
//! collectd ──POST /──► decode ──► flatten ──► encode ──► POST /db/../series ──► InfluxDB
//! ```
//!
//! Each inbound request is translated and relayed independently; nothing is
//! retained across requests.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

pub mod config;
pub mod error;
pub mod relay;
pub mod sample;
pub mod series;
pub mod server;
pub mod translate;

pub use config::Config;
pub use error::{Result, SiltaError};
