// Shared test helpers

use perfchart::models::Sample;

pub fn sample(elapsed_seconds: i64, cpu: f64, mem: f64, conn: f64) -> Sample {
    Sample {
        index: 0,
        timestamp_nanos: elapsed_seconds * 1_000_000_000,
        elapsed_seconds,
        cpu,
        mem,
        conn,
    }
}

/// Samples with indices assigned by position, the way the CSV parser does.
pub fn samples_at(specs: &[(i64, f64, f64, f64)]) -> Vec<Sample> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(elapsed, cpu, mem, conn))| Sample {
            index: i,
            ..sample(elapsed, cpu, mem, conn)
        })
        .collect()
}
