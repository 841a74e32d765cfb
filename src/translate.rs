//! Key composition and sample flattening
//!
//! This is the core of the relay: each sample expands into one point per
//! declared value, keyed by a dotted path built from the sample's non-empty
//! dimensional labels plus the value's own name.

use tracing::debug;

use crate::error::{Result, SiltaError};
use crate::sample::{Point, Sample};

/// Compose the dotted metric key for one value slot.
///
/// Candidates are joined in order `plugin.plugin_instance.type.type_instance.name`
/// with empty segments dropped (not replaced by a placeholder). The host is
/// a separate output column, never part of the key. If every candidate is
/// empty the key is the empty string, which is forwarded as-is.
pub fn compose_key(sample: &Sample, value_name: &str) -> String {
    [
        sample.plugin.as_str(),
        sample.plugin_instance.as_str(),
        sample.type_name.as_str(),
        sample.type_instance.as_str(),
        value_name,
    ]
    .iter()
    .filter(|segment| !segment.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(".")
}

/// Expand a batch of samples into points, one per declared value.
///
/// Points come out in input order: sample order, then value order within a
/// sample. A `values`/`dsnames` length mismatch in any sample aborts the
/// whole batch with a shape fault before anything is relayed.
pub fn flatten(samples: &[Sample]) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (index, sample) in samples.iter().enumerate() {
        if sample.values.len() != sample.dsnames.len() {
            return Err(SiltaError::Shape {
                sample: index,
                values: sample.values.len(),
                names: sample.dsnames.len(),
            });
        }

        for (&value, name) in sample.values.iter().zip(&sample.dsnames) {
            let key = compose_key(sample, name);
            debug!(host = %sample.host, key = %key, value, "Composed point");
            points.push(Point {
                host: sample.host.clone(),
                key,
                value,
            });
        }
    }

    Ok(points)
}
