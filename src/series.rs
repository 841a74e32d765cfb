//! Outbound batch model for the InfluxDB v0.8 series API
//!
//! One inbound request produces exactly one named batch. Rows are ordered
//! 3-element tuples so the serialized form is deterministic: fixed column
//! order, input row order, numeric values kept numeric.

use serde::Serialize;

use crate::sample::Point;

/// Fixed batch name the destination groups these points under
pub const BATCH_NAME: &str = "events";

/// Column order for every row
pub const COLUMNS: [&str; 3] = ["host", "key", "value"];

/// The named, columnar batch delivered to InfluxDB
///
/// Serializes to `{"name":"events","columns":["host","key","value"],"points":[[host,key,value],...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesBatch {
    name: &'static str,
    columns: [&'static str; 3],
    points: Vec<(String, String, f64)>,
}

impl SeriesBatch {
    /// Assemble a batch from points in flattening order
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            name: BATCH_NAME,
            columns: COLUMNS,
            points: points
                .into_iter()
                .map(|p| (p.host, p.key, p.value))
                .collect(),
        }
    }

    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
