// Scale/interval advisor: which bucket widths are usable for a given duration,
// and how to space axis ticks. Pure functions over duration/count metadata;
// independent of the bucketing engine's output.

use crate::aggregation::AggregationInterval;
use crate::models::TimeScale;

/// Usable bucket-count window for aggregated views.
const MIN_BUCKETS: f64 = 5.0;
const MAX_BUCKETS: f64 = 500.0;

/// Nice-number snap tables, first match (value <= entry) wins; values past the
/// end clamp to the last entry.
const MINUTE_SNAPS: [f64; 6] = [1.0, 5.0, 10.0, 15.0, 30.0, 60.0];
const HOUR_SNAPS: [f64; 7] = [1.0, 2.0, 3.0, 4.0, 6.0, 12.0, 24.0];

/// Intervals whose bucket count `ceil(total / width)` falls in [5, 500],
/// in ascending-width order. May be empty for very short series; callers
/// must fall back (see [`recommended_interval`]).
pub fn available_intervals(total_seconds: f64) -> Vec<AggregationInterval> {
    AggregationInterval::ALL
        .iter()
        .copied()
        .filter(|interval| {
            let buckets = (total_seconds / interval.seconds() as f64).ceil();
            (MIN_BUCKETS..=MAX_BUCKETS).contains(&buckets)
        })
        .collect()
}

/// Default interval when switching into the aggregated view: 5 minutes when
/// usable, otherwise the middle of the available set, otherwise 1 minute.
pub fn recommended_interval(total_seconds: f64) -> AggregationInterval {
    let available = available_intervals(total_seconds);
    if available.contains(&AggregationInterval::FiveMin) {
        return AggregationInterval::FiveMin;
    }
    available
        .get(available.len() / 2)
        .copied()
        .unwrap_or(AggregationInterval::OneMin)
}

/// Stride in data points between rendered axis labels, such that roughly
/// `max_ticks` labels span the series. The ideal seconds-per-tick is snapped
/// up to a nice value (whole seconds / minute table / hour table / whole
/// days) before converting back to a point count. Never returns 0.
pub fn tick_interval(data_length: usize, total_seconds: f64, max_ticks: usize) -> usize {
    if data_length == 0 || total_seconds <= 0.0 || max_ticks == 0 {
        return 1;
    }

    let seconds_per_tick = total_seconds / max_ticks as f64;
    let nice_seconds = if seconds_per_tick >= 86_400.0 {
        (seconds_per_tick / 86_400.0).ceil() * 86_400.0
    } else if seconds_per_tick >= 3_600.0 {
        snap_up(seconds_per_tick / 3_600.0, &HOUR_SNAPS) * 3_600.0
    } else if seconds_per_tick >= 60.0 {
        snap_up(seconds_per_tick / 60.0, &MINUTE_SNAPS) * 60.0
    } else {
        seconds_per_tick.ceil().max(1.0)
    };

    let points_per_second = data_length as f64 / total_seconds;
    ((nice_seconds * points_per_second).round() as usize).max(1)
}

fn snap_up(value: f64, table: &[f64]) -> f64 {
    table
        .iter()
        .copied()
        .find(|&snap| value <= snap)
        .or_else(|| table.last().copied())
        .unwrap_or(value)
}

/// Auto-detected axis scale, first threshold match wins: days past 2 days,
/// hours past 4 hours, minutes past 10 minutes, else seconds.
pub fn time_scale(total_seconds: f64) -> TimeScale {
    if total_seconds >= 172_800.0 {
        TimeScale::Days
    } else if total_seconds >= 14_400.0 {
        TimeScale::Hours
    } else if total_seconds >= 600.0 {
        TimeScale::Minutes
    } else {
        TimeScale::Seconds
    }
}
