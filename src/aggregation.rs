// Bucketing engine: partitions ordered samples into fixed-width time buckets
// and reduces each bucket to avg/min/max per metric. Input must be sorted by
// elapsed_seconds ascending (not validated); only one bucket is open at a time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AggregatedRecord, MetricSummary, Sample};
use crate::timefmt;

/// Fixed bucket widths. The ladder is a closed set; `ALL` is the canonical
/// order used everywhere (selector UI, filtering, bucketing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationInterval {
    #[serde(rename = "1min")]
    OneMin,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "10min")]
    TenMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "2hour")]
    TwoHour,
    #[serde(rename = "4hour")]
    FourHour,
}

impl AggregationInterval {
    pub const ALL: [AggregationInterval; 8] = [
        AggregationInterval::OneMin,
        AggregationInterval::FiveMin,
        AggregationInterval::TenMin,
        AggregationInterval::FifteenMin,
        AggregationInterval::ThirtyMin,
        AggregationInterval::OneHour,
        AggregationInterval::TwoHour,
        AggregationInterval::FourHour,
    ];

    /// Bucket width in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            AggregationInterval::OneMin => 60,
            AggregationInterval::FiveMin => 300,
            AggregationInterval::TenMin => 600,
            AggregationInterval::FifteenMin => 900,
            AggregationInterval::ThirtyMin => 1800,
            AggregationInterval::OneHour => 3600,
            AggregationInterval::TwoHour => 7200,
            AggregationInterval::FourHour => 14400,
        }
    }

    /// Wire name used in query strings and config (e.g. "5min").
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationInterval::OneMin => "1min",
            AggregationInterval::FiveMin => "5min",
            AggregationInterval::TenMin => "10min",
            AggregationInterval::FifteenMin => "15min",
            AggregationInterval::ThirtyMin => "30min",
            AggregationInterval::OneHour => "1hour",
            AggregationInterval::TwoHour => "2hour",
            AggregationInterval::FourHour => "4hour",
        }
    }

    /// Human-readable label for the interval selector.
    pub fn label(self) -> &'static str {
        match self {
            AggregationInterval::OneMin => "1 Minute",
            AggregationInterval::FiveMin => "5 Minutes",
            AggregationInterval::TenMin => "10 Minutes",
            AggregationInterval::FifteenMin => "15 Minutes",
            AggregationInterval::ThirtyMin => "30 Minutes",
            AggregationInterval::OneHour => "1 Hour",
            AggregationInterval::TwoHour => "2 Hours",
            AggregationInterval::FourHour => "4 Hours",
        }
    }
}

impl std::fmt::Display for AggregationInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown aggregation interval '{0}'")]
pub struct UnknownInterval(String);

impl std::str::FromStr for AggregationInterval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationInterval::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| UnknownInterval(s.to_string()))
    }
}

/// What to do with NaN metric values before reducing a bucket.
/// `Propagate` keeps the historical behavior: one NaN poisons the bucket's
/// avg/min/max for that metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    #[default]
    Propagate,
    Drop,
    Zero,
}

/// The one open bucket during the walk. Closed (reduced and emitted) when a
/// sample for a later bucket arrives or input ends.
struct OpenBucket<'a> {
    start: i64,
    samples: Vec<&'a Sample>,
}

/// Buckets `samples` into `interval`-wide windows and reduces each to one
/// [`AggregatedRecord`]. Empty input yields empty output. Windows with no
/// samples are skipped, so output indices are dense while bucket starts may
/// jump by more than one interval.
pub fn aggregate(samples: &[Sample], interval: AggregationInterval) -> Vec<AggregatedRecord> {
    aggregate_with_policy(samples, interval, NanPolicy::Propagate)
}

/// [`aggregate`] with an explicit NaN policy.
pub fn aggregate_with_policy(
    samples: &[Sample],
    interval: AggregationInterval,
    policy: NanPolicy,
) -> Vec<AggregatedRecord> {
    let interval_seconds = interval.seconds();
    let mut emitted: Vec<AggregatedRecord> = Vec::new();
    let mut open: Option<OpenBucket> = None;

    for sample in samples {
        let bucket_start = (sample.elapsed_seconds / interval_seconds) * interval_seconds;
        match &mut open {
            Some(bucket) if bucket.start == bucket_start => bucket.samples.push(sample),
            Some(bucket) => {
                let index = emitted.len();
                emitted.push(reduce_bucket(bucket, interval_seconds, index, policy));
                *bucket = OpenBucket {
                    start: bucket_start,
                    samples: vec![sample],
                };
            }
            None => {
                open = Some(OpenBucket {
                    start: bucket_start,
                    samples: vec![sample],
                });
            }
        }
    }

    // Non-empty input always leaves exactly one pending bucket.
    if let Some(bucket) = &open {
        let index = emitted.len();
        emitted.push(reduce_bucket(bucket, interval_seconds, index, policy));
    }

    emitted
}

fn reduce_bucket(
    bucket: &OpenBucket<'_>,
    interval_seconds: i64,
    index: usize,
    policy: NanPolicy,
) -> AggregatedRecord {
    let cpu = summarize(&metric_values(&bucket.samples, |s| s.cpu, policy), false);
    let mem = summarize(&metric_values(&bucket.samples, |s| s.mem, policy), true);
    let conn = summarize(&metric_values(&bucket.samples, |s| s.conn, policy), true);

    AggregatedRecord {
        index,
        elapsed_seconds: bucket.start,
        start_time: timefmt::format_hms(bucket.start),
        end_time: timefmt::format_hms(bucket.start + interval_seconds),
        time_label: timefmt::format_bucket_label(bucket.start),
        cpu,
        mem,
        conn,
        sample_count: bucket.samples.len(),
    }
}

fn metric_values(samples: &[&Sample], metric: impl Fn(&Sample) -> f64, policy: NanPolicy) -> Vec<f64> {
    let values = samples.iter().map(|s| metric(s));
    match policy {
        NanPolicy::Propagate => values.collect(),
        NanPolicy::Drop => values.filter(|v| !v.is_nan()).collect(),
        NanPolicy::Zero => values.map(|v| if v.is_nan() { 0.0 } else { v }).collect(),
    }
}

/// avg is always rounded to 2 decimals; max/min are rounded to 2 decimals for
/// cpu and to whole numbers for mem/conn (`integer_extremes`). The two
/// policies are part of the output contract.
fn summarize(values: &[f64], integer_extremes: bool) -> MetricSummary {
    if values.is_empty() {
        // Every value was dropped by NanPolicy::Drop.
        return MetricSummary {
            avg: 0.0,
            max: 0.0,
            min: 0.0,
        };
    }

    let avg = round2(values.iter().sum::<f64>() / values.len() as f64);

    // f64::max/min skip NaN operands; a NaN sample must poison the extremes too.
    let (max, min) = if values.iter().any(|v| v.is_nan()) {
        (f64::NAN, f64::NAN)
    } else {
        (
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            values.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    if integer_extremes {
        MetricSummary {
            avg,
            max: max.round(),
            min: min.round(),
        }
    } else {
        MetricSummary {
            avg,
            max: round2(max),
            min: round2(min),
        }
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
