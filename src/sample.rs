//! Inbound data model for SILTA
//!
//! A [`Sample`] is one measurement event as collectd's `write_http` plugin
//! posts it: parallel `values`/`dsnames` sequences plus dimensional labels.
//! A [`Point`] is one flattened scalar derived from a sample, alive only for
//! the duration of encoding one outbound batch.

use serde::Deserialize;

use crate::error::{Result, SiltaError};

/// One collectd measurement event
///
/// Every field is optional on the wire: missing labels default to the empty
/// string, missing sequences to empty, and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sample {
    /// Scalar measurements, parallel to `dsnames`
    #[serde(default)]
    pub values: Vec<f64>,

    /// Data source types (gauge, derive, ...); carried but unused
    #[serde(default)]
    pub dstypes: Vec<String>,

    /// Names for each entry of `values`, in the same order
    #[serde(default)]
    pub dsnames: Vec<String>,

    #[serde(default)]
    pub time: f64,

    #[serde(default)]
    pub interval: f64,

    /// Originating machine
    #[serde(default)]
    pub host: String,

    /// Dimensional labels, each optionally empty
    #[serde(default)]
    pub plugin: String,

    #[serde(default)]
    pub plugin_instance: String,

    #[serde(default, rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub type_instance: String,
}

/// One flattened scalar, ready for output encoding
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub host: String,
    pub key: String,
    pub value: f64,
}

/// Decode a request body into a batch of samples.
///
/// The body must be a UTF-8 JSON array of sample objects; anything else is a
/// fatal decode fault for the request.
pub fn decode(body: &[u8]) -> Result<Vec<Sample>> {
    serde_json::from_slice(body).map_err(SiltaError::Decode)
}
