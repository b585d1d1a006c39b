use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(skip)]
    pub environment: Environment,
    pub server: ServerSettings,
    pub flink: FlinkSettings,
    pub jobs: JobSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlinkSettings {
    /// Install directory holding `bin/flink`.
    pub home: PathBuf,
    pub rest_url: String,
    /// Entry-point class of the OMT pipeline runner.
    pub entry_class: String,
    pub pipeline_jar: PathBuf,
    pub submit_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    /// Directory the materialized config documents are written into.
    pub config_dir: PathBuf,
}

impl Settings {
    /// Builds settings from environment variables, applying the documented
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let environment = std::env::var("APP_ENV")
            .ok()
            .and_then(|v| Environment::from_str(&v).ok())
            .unwrap_or(Environment::Local);

        let home = PathBuf::from(var_or("FLINK_HOME", "/root/flink/flink-1.19.1"));
        let pipeline_jar = std::env::var("OMT_PIPELINE_JAR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("lib/flink-omt-flink_1.18-1.1.jar"));

        Self {
            environment,
            server: ServerSettings {
                host: var_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5000),
            },
            flink: FlinkSettings {
                rest_url: var_or("FLINK_REST_URL", "http://localhost:8081"),
                entry_class: var_or("OMT_ENTRY_CLASS", "com.oceanbase.omt.cli.CommandLineCliFront"),
                pipeline_jar,
                submit_timeout_secs: 30,
                home,
            },
            jobs: JobSettings {
                config_dir: std::env::var("SYNC_CONFIG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| std::env::temp_dir()),
            },
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
