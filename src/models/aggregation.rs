// Aggregated chart record: one row per non-empty time bucket.
// Scalars have avg/min/max; labels are precomputed for the axis and tooltip.

use serde::{Deserialize, Serialize};

/// avg/max/min for one metric over one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

/// One aggregated row: bucket start offset, time labels, and per-metric
/// summaries. `index` is the 0-based position among emitted records, dense
/// even when empty time windows are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRecord {
    pub index: usize,
    /// Bucket start, in elapsed seconds.
    pub elapsed_seconds: i64,
    pub start_time: String,
    pub end_time: String,
    pub time_label: String,
    pub cpu: MetricSummary,
    pub mem: MetricSummary,
    pub conn: MetricSummary,
    pub sample_count: usize,
}

/// Display scale for the time axis; serializes to lowercase JSON (e.g. "hours").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Seconds,
    Minutes,
    Hours,
    Days,
}
