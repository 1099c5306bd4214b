// Domain models (sample input, aggregated output)

mod aggregation;
mod sample;

pub use aggregation::{AggregatedRecord, MetricSummary, TimeScale};
pub use sample::Sample;
