// One normalized observation from the uploaded CSV

use serde::{Deserialize, Serialize};

/// A single performance sample. `elapsed_seconds` is the whole-second offset
/// from the first sample of the file; `index` is the position within the
/// currently selected range (reassigned on every slice).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub index: usize,
    pub timestamp_nanos: i64,
    pub elapsed_seconds: i64,
    pub cpu: f64,
    pub mem: f64,
    pub conn: f64,
}
