use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::domain::ConfigValue;

#[derive(Debug, thiserror::Error)]
pub enum SqlGatewayError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Connection coordinates for a downstream MySQL-protocol database.
#[derive(Debug, Clone, Deserialize)]
pub struct DbEndpoint {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: Option<String>,
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = ConfigValue::deserialize(deserializer)?;
    value
        .to_string()
        .trim()
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid port: {}", value)))
}

/// Result of one ad-hoc statement.
#[derive(Debug)]
pub enum SqlOutcome {
    /// Query-style statement: column names, rows as JSON objects, row count.
    Rows {
        columns: Vec<String>,
        rows: Vec<serde_json::Value>,
        row_count: usize,
    },
    /// Mutating statement: number of affected rows after commit.
    Affected { rows: u64 },
}

/// Ad-hoc SQL execution and connection probing against source/sink databases.
#[async_trait]
pub trait SqlGateway: Send + Sync {
    /// Opens a short-lived connection and runs `SELECT 1`.
    async fn probe(&self, endpoint: &DbEndpoint) -> Result<(), SqlGatewayError>;

    /// Runs one statement on a fresh connection.
    async fn execute(&self, endpoint: &DbEndpoint, sql: &str) -> Result<SqlOutcome, SqlGatewayError>;
}
