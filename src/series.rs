// The one in-memory uploaded series. A new upload replaces it wholesale;
// range selection produces re-indexed sub-series.

use serde::Serialize;

use crate::aggregation::round2;
use crate::models::Sample;

/// Parsed samples of the current upload, ordered by elapsed_seconds ascending.
#[derive(Debug, Clone)]
pub struct Series {
    samples: Vec<Sample>,
}

/// Header-card numbers for the displayed range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub record_count: usize,
    pub total_seconds: i64,
    pub peak_cpu: f64,
    pub max_conn: f64,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Duration covered by the samples (last minus first elapsed offset).
    /// For a full upload the first offset is 0, so this is the last offset.
    pub fn total_seconds(&self) -> i64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.elapsed_seconds - first.elapsed_seconds,
            _ => 0,
        }
    }

    pub fn summary(&self) -> SeriesSummary {
        let peak_cpu = self.samples.iter().map(|s| s.cpu).fold(0.0, f64::max);
        let max_conn = self.samples.iter().map(|s| s.conn).fold(0.0, f64::max);
        SeriesSummary {
            record_count: self.len(),
            total_seconds: self.total_seconds(),
            peak_cpu: round2(peak_cpu),
            max_conn,
        }
    }

    /// Index of the first sample at or past `target` elapsed seconds, or the
    /// closest sample when the target lies beyond the series. Used to turn a
    /// seconds-based range selection into sample indices.
    pub fn index_at_seconds(&self, target: i64) -> usize {
        let Some(first) = self.samples.first() else {
            return 0;
        };
        if target <= first.elapsed_seconds {
            return 0;
        }

        let mut closest = 0;
        let mut min_diff = (first.elapsed_seconds - target).abs();

        for (i, sample) in self.samples.iter().enumerate().skip(1) {
            let diff = (sample.elapsed_seconds - target).abs();
            if diff < min_diff {
                min_diff = diff;
                closest = i;
            }
            if sample.elapsed_seconds >= target {
                return i;
            }
        }

        closest
    }

    /// Inclusive index range as a new series. Out-of-range indices are
    /// clamped; an inverted range yields an empty series. Sample indices are
    /// reassigned from 0 within the slice.
    pub fn slice(&self, start: usize, end: usize) -> Series {
        if self.samples.is_empty() || start >= self.samples.len() {
            return Series::new(Vec::new());
        }
        let end = end.min(self.samples.len() - 1);
        if start > end {
            return Series::new(Vec::new());
        }

        let samples = self.samples[start..=end]
            .iter()
            .enumerate()
            .map(|(i, s)| Sample {
                index: i,
                ..s.clone()
            })
            .collect();
        Series::new(samples)
    }
}
