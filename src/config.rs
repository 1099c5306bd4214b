use serde::Deserialize;

use crate::aggregation::NanPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub charting: ChartingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Max accepted CSV upload size; larger bodies are rejected with 413.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartingConfig {
    /// Target number of axis labels when the caller doesn't pass maxTicks.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
    /// How NaN metric values are treated during aggregation.
    #[serde(default)]
    pub nan_policy: NanPolicy,
}

impl Default for ChartingConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            nan_policy: NanPolicy::default(),
        }
    }
}

fn default_max_ticks() -> usize {
    10
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.ingest.max_upload_bytes > 0,
            "ingest.max_upload_bytes must be > 0, got {}",
            self.ingest.max_upload_bytes
        );
        anyhow::ensure!(
            self.charting.max_ticks > 0,
            "charting.max_ticks must be > 0, got {}",
            self.charting.max_ticks
        );
        Ok(())
    }
}
