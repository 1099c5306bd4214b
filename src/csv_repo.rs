// CSV parsing: uploaded text -> normalized samples.
// Expected columns: timestamp_nanos,cpu,mem,conn. First line is a header.

use thiserror::Error;

use crate::models::Sample;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },
}

/// Parses CSV text into samples. The header row is skipped and blank lines
/// are ignored; a header-only file yields an empty vec. Metric columns that
/// are missing or unparsable default to 0. `elapsed_seconds` is the
/// whole-second offset from the first row's timestamp; a bad timestamp is a
/// hard error carrying the 1-based line number.
pub fn parse_csv(text: &str) -> Result<Vec<Sample>, CsvError> {
    let mut samples: Vec<Sample> = Vec::new();
    let mut first_timestamp: Option<i64> = None;

    for (line_idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut columns = line.split(',');
        let ts_column = columns.next().unwrap_or("").trim();
        let timestamp_nanos: i64 =
            ts_column
                .parse()
                .map_err(|_| CsvError::InvalidTimestamp {
                    line: line_idx + 1,
                    value: ts_column.to_string(),
                })?;

        let cpu = parse_metric(columns.next());
        let mem = parse_metric(columns.next());
        let conn = parse_metric(columns.next());

        let first = *first_timestamp.get_or_insert(timestamp_nanos);
        let elapsed_seconds = (timestamp_nanos - first) / 1_000_000_000;

        samples.push(Sample {
            index: samples.len(),
            timestamp_nanos,
            elapsed_seconds,
            cpu,
            mem,
            conn,
        });
    }

    Ok(samples)
}

/// Missing, unparsable, and literal-NaN cells all read as 0.
fn parse_metric(column: Option<&str>) -> f64 {
    match column.map(|s| s.trim().parse::<f64>()) {
        Some(Ok(v)) if !v.is_nan() => v,
        _ => 0.0,
    }
}
