use serde::Deserialize;
use std::collections::HashSet;

use crate::extractor::DEFAULT_TIMESTAMP_FORMAT;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub statistics: StatisticsConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsConfig {
    /// Root of the `<date>/<host>/...` statistics directory tree.
    pub base_path: String,
    /// chrono format of the first (timestamp) column of every row.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterConfig {
    /// Hosts charted for scope=ALL, in legend order.
    #[serde(default)]
    pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_duration_mins")]
    pub default_duration_mins: u32,
    #[serde(default = "default_max_duration_mins")]
    pub max_duration_mins: u32,
}

fn default_duration_mins() -> u32 {
    30
}

fn default_max_duration_mins() -> u32 {
    7 * 24 * 60
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_duration_mins: default_duration_mins(),
            max_duration_mins: default_max_duration_mins(),
        }
    }
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
            !self.statistics.base_path.is_empty(),
            "statistics.base_path must be non-empty"
        );
        anyhow::ensure!(
            !self.statistics.timestamp_format.trim().is_empty(),
            "statistics.timestamp_format must be non-empty"
        );
        let mut seen = HashSet::with_capacity(self.cluster.hosts.len());
        for host in &self.cluster.hosts {
            anyhow::ensure!(
                !host.trim().is_empty(),
                "cluster.hosts must not contain blank host names"
            );
            anyhow::ensure!(
                seen.insert(host.as_str()),
                "cluster.hosts contains duplicate host {:?}",
                host
            );
        }
        anyhow::ensure!(
            self.chart.default_duration_mins > 0,
            "chart.default_duration_mins must be > 0, got {}",
            self.chart.default_duration_mins
        );
        anyhow::ensure!(
            self.chart.max_duration_mins >= self.chart.default_duration_mins,
            "chart.max_duration_mins must be >= chart.default_duration_mins ({}), got {}",
            self.chart.default_duration_mins,
            self.chart.max_duration_mins
        );
        Ok(())
    }
}
