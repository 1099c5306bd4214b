// Bucketing engine tests: bucket boundaries, per-metric rounding, NaN policies

mod common;

use common::{sample, samples_at};
use perfchart::aggregation::{AggregationInterval, NanPolicy, aggregate, aggregate_with_policy};
use perfchart::models::Sample;

#[test]
fn aggregate_empty_returns_empty() {
    let samples: Vec<Sample> = vec![];
    let out = aggregate(&samples, AggregationInterval::OneMin);
    assert!(out.is_empty());
}

#[test]
fn aggregate_single_sample() {
    let samples = vec![sample(30, 25.5, 512.0, 4.0)];
    let out = aggregate(&samples, AggregationInterval::OneMin);
    assert_eq!(out.len(), 1);

    let record = &out[0];
    assert_eq!(record.index, 0);
    assert_eq!(record.elapsed_seconds, 0);
    assert_eq!(record.sample_count, 1);
    assert_eq!(record.cpu.avg, 25.5);
    assert_eq!(record.cpu.max, 25.5);
    assert_eq!(record.cpu.min, 25.5);
    assert_eq!(record.mem.avg, 512.0);
    assert_eq!(record.mem.max, 512.0);
    assert_eq!(record.mem.min, 512.0);
}

#[test]
fn aggregate_two_buckets_with_stats_and_labels() {
    let samples = samples_at(&[
        (0, 10.0, 100.0, 1.0),
        (30, 20.0, 200.0, 2.0),
        (65, 30.0, 300.0, 3.0),
    ]);
    let out = aggregate(&samples, AggregationInterval::OneMin);
    assert_eq!(out.len(), 2);

    let first = &out[0];
    assert_eq!(first.index, 0);
    assert_eq!(first.elapsed_seconds, 0);
    assert_eq!(first.sample_count, 2);
    assert_eq!(first.cpu.avg, 15.0);
    assert_eq!(first.cpu.max, 20.0);
    assert_eq!(first.cpu.min, 10.0);
    assert_eq!(first.mem.avg, 150.0);
    assert_eq!(first.mem.max, 200.0);
    assert_eq!(first.mem.min, 100.0);
    assert_eq!(first.conn.avg, 1.5);
    assert_eq!(first.conn.max, 2.0);
    assert_eq!(first.conn.min, 1.0);
    assert_eq!(first.start_time, "0s");
    assert_eq!(first.end_time, "1m 0s");
    assert_eq!(first.time_label, "0m");

    let second = &out[1];
    assert_eq!(second.index, 1);
    assert_eq!(second.elapsed_seconds, 60);
    assert_eq!(second.sample_count, 1);
    assert_eq!(second.cpu.avg, 30.0);
    assert_eq!(second.start_time, "1m 0s");
    assert_eq!(second.end_time, "2m 0s");
    assert_eq!(second.time_label, "1m");
}

#[test]
fn aggregate_rounds_cpu_to_two_decimals_and_mem_conn_extremes_to_whole() {
    let samples = vec![sample(0, 33.333, 100.6, 2.4)];
    let out = aggregate(&samples, AggregationInterval::OneMin);
    let record = &out[0];

    assert_eq!(record.cpu.avg, 33.33);
    assert_eq!(record.cpu.max, 33.33);
    assert_eq!(record.cpu.min, 33.33);
    // mem/conn avg keeps two decimals; max/min round to whole numbers
    assert_eq!(record.mem.avg, 100.6);
    assert_eq!(record.mem.max, 101.0);
    assert_eq!(record.mem.min, 101.0);
    assert_eq!(record.conn.avg, 2.4);
    assert_eq!(record.conn.max, 2.0);
    assert_eq!(record.conn.min, 2.0);
}

#[test]
fn aggregate_skips_empty_windows_but_keeps_indices_dense() {
    let samples = samples_at(&[
        (0, 10.0, 100.0, 1.0),
        (30, 20.0, 200.0, 2.0),
        // nothing between 60 and 180
        (200, 30.0, 300.0, 3.0),
    ]);
    let out = aggregate(&samples, AggregationInterval::OneMin);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].index, 0);
    assert_eq!(out[0].elapsed_seconds, 0);
    assert_eq!(out[1].index, 1);
    assert_eq!(out[1].elapsed_seconds, 180);
}

#[test]
fn aggregate_sample_counts_sum_to_input_length() {
    let specs: Vec<(i64, f64, f64, f64)> = (0..1000)
        .map(|i| (i * 7, (i % 50) as f64, (i % 300) as f64, (i % 9) as f64))
        .collect();
    let samples = samples_at(&specs);

    for interval in AggregationInterval::ALL {
        let out = aggregate(&samples, interval);
        let total: usize = out.iter().map(|r| r.sample_count).sum();
        assert_eq!(total, samples.len(), "interval {interval}");
    }
}

#[test]
fn aggregate_bucket_starts_strictly_increase_and_stats_are_ordered() {
    let specs: Vec<(i64, f64, f64, f64)> = (0..500)
        .map(|i| (i * 13, (i % 77) as f64 + 0.25, (i % 211) as f64, (i % 5) as f64))
        .collect();
    let samples = samples_at(&specs);
    let out = aggregate(&samples, AggregationInterval::FiveMin);
    assert!(!out.is_empty());

    for pair in out.windows(2) {
        assert!(pair[0].elapsed_seconds < pair[1].elapsed_seconds);
    }
    for record in &out {
        assert!(record.sample_count >= 1);
        for metric in [&record.cpu, &record.mem, &record.conn] {
            assert!(metric.min <= metric.avg + 0.01);
            assert!(metric.avg <= metric.max + 0.01);
        }
    }
}

#[test]
fn aggregate_is_idempotent() {
    let samples = samples_at(&[
        (0, 10.0, 100.0, 1.0),
        (45, 12.5, 120.0, 2.0),
        (90, 15.0, 140.0, 3.0),
    ]);
    let first = aggregate(&samples, AggregationInterval::OneMin);
    let second = aggregate(&samples, AggregationInterval::OneMin);
    assert_eq!(first, second);
}

#[test]
fn nan_propagate_poisons_bucket_stats() {
    let samples = samples_at(&[(0, 10.0, 100.0, 1.0), (10, f64::NAN, 200.0, 2.0)]);
    let out = aggregate_with_policy(&samples, AggregationInterval::OneMin, NanPolicy::Propagate);
    let record = &out[0];

    assert!(record.cpu.avg.is_nan());
    assert!(record.cpu.max.is_nan());
    assert!(record.cpu.min.is_nan());
    // other metrics are untouched
    assert_eq!(record.mem.avg, 150.0);
    assert_eq!(record.sample_count, 2);
}

#[test]
fn nan_drop_filters_values_but_keeps_sample_count() {
    let samples = samples_at(&[(0, 10.0, 100.0, 1.0), (10, f64::NAN, 200.0, 2.0)]);
    let out = aggregate_with_policy(&samples, AggregationInterval::OneMin, NanPolicy::Drop);
    let record = &out[0];

    assert_eq!(record.cpu.avg, 10.0);
    assert_eq!(record.cpu.max, 10.0);
    assert_eq!(record.cpu.min, 10.0);
    assert_eq!(record.sample_count, 2);
}

#[test]
fn nan_drop_with_all_values_dropped_zeroes_the_metric() {
    let samples = samples_at(&[(0, f64::NAN, 100.0, 1.0), (10, f64::NAN, 200.0, 2.0)]);
    let out = aggregate_with_policy(&samples, AggregationInterval::OneMin, NanPolicy::Drop);
    let record = &out[0];

    assert_eq!(record.cpu.avg, 0.0);
    assert_eq!(record.cpu.max, 0.0);
    assert_eq!(record.cpu.min, 0.0);
    assert_eq!(record.mem.avg, 150.0);
    assert_eq!(record.sample_count, 2);
}

#[test]
fn nan_zero_maps_values_to_zero() {
    let samples = samples_at(&[(0, 10.0, 100.0, 1.0), (10, f64::NAN, 200.0, 2.0)]);
    let out = aggregate_with_policy(&samples, AggregationInterval::OneMin, NanPolicy::Zero);
    let record = &out[0];

    assert_eq!(record.cpu.avg, 5.0);
    assert_eq!(record.cpu.max, 10.0);
    assert_eq!(record.cpu.min, 0.0);
}

#[test]
fn interval_parses_from_wire_names() {
    assert_eq!(
        "5min".parse::<AggregationInterval>().unwrap(),
        AggregationInterval::FiveMin
    );
    assert_eq!(
        "4hour".parse::<AggregationInterval>().unwrap(),
        AggregationInterval::FourHour
    );
    assert!("7min".parse::<AggregationInterval>().is_err());
}

#[test]
fn interval_ladder_is_ascending_with_known_widths() {
    let seconds: Vec<i64> = AggregationInterval::ALL.iter().map(|i| i.seconds()).collect();
    assert_eq!(seconds, vec![60, 300, 600, 900, 1800, 3600, 7200, 14400]);
    assert_eq!(AggregationInterval::OneMin.label(), "1 Minute");
    assert_eq!(AggregationInterval::TwoHour.label(), "2 Hours");
}
