use std::fmt;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required config section: {0}")]
    MissingSection(&'static str),
    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Scalar from the console payload that may arrive as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Text(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Submission payload for one synchronization pipeline.
///
/// All three sections are required; their inner fields are optional and fall
/// back to the documented defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncJobConfig {
    pub starrocks: Option<StarRocksConfig>,
    pub oceanbase: Option<OceanBaseConfig>,
    #[serde(rename = "flinkOMT")]
    pub flink_omt: Option<PipelineOptions>,
}

impl SyncJobConfig {
    /// Splits the payload into its sections, rejecting any missing one.
    pub fn validated(
        self,
    ) -> Result<(StarRocksConfig, OceanBaseConfig, PipelineOptions), ConfigError> {
        let starrocks = self
            .starrocks
            .ok_or(ConfigError::MissingSection("starrocks"))?;
        let oceanbase = self
            .oceanbase
            .ok_or(ConfigError::MissingSection("oceanbase"))?;
        let flink_omt = self
            .flink_omt
            .ok_or(ConfigError::MissingSection("flinkOMT"))?;
        Ok((starrocks, oceanbase, flink_omt))
    }
}

/// Source (StarRocks) connection description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StarRocksConfig {
    pub host: Option<String>,
    pub port: Option<ConfigValue>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "scanPort")]
    pub scan_port: Option<ConfigValue>,
    #[serde(rename = "scanMaxRetries")]
    pub scan_max_retries: Option<ConfigValue>,
    pub tables: Option<String>,
    pub database: Option<String>,
}

impl StarRocksConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn port(&self) -> String {
        value_or(&self.port, "9030")
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("root")
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }

    /// FE HTTP port used by the scan interface.
    pub fn scan_port(&self) -> String {
        value_or(&self.scan_port, "8030")
    }

    pub fn scan_max_retries(&self) -> String {
        value_or(&self.scan_max_retries, "1")
    }

    pub fn tables(&self) -> &str {
        self.tables.as_deref().unwrap_or("")
    }
}

/// Sink (OceanBase) connection description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OceanBaseConfig {
    pub host: Option<String>,
    pub port: Option<ConfigValue>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl OceanBaseConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn port(&self) -> String {
        value_or(&self.port, "2881")
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("root@test")
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }
}

/// Pipeline tuning options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineOptions {
    #[serde(rename = "checkpointInterval")]
    pub checkpoint_interval: Option<ConfigValue>,
    pub parallelism: Option<ConfigValue>,
}

impl PipelineOptions {
    pub const DEFAULT_CHECKPOINT_INTERVAL_MS: u64 = 10_000;
    pub const DEFAULT_PARALLELISM: u32 = 2;

    pub fn checkpoint_interval_ms(&self) -> Result<u64, ConfigError> {
        parse_or(
            &self.checkpoint_interval,
            "checkpointInterval",
            Self::DEFAULT_CHECKPOINT_INTERVAL_MS,
        )
    }

    /// Checkpoint interval in whole seconds.
    ///
    /// Integer division: a sub-second remainder is truncated, so 1500 ms
    /// becomes 1 s.
    pub fn checkpoint_interval_secs(&self) -> Result<u64, ConfigError> {
        Ok(self.checkpoint_interval_ms()? / 1000)
    }

    pub fn parallelism(&self) -> Result<u32, ConfigError> {
        parse_or(&self.parallelism, "parallelism", Self::DEFAULT_PARALLELISM)
    }
}

fn value_or(value: &Option<ConfigValue>, default: &str) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T: std::str::FromStr>(
    value: &Option<ConfigValue>,
    field: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => {
            let text = v.to_string();
            text.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { field, value: text })
        }
    }
}
