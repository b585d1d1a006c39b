use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Column, ConnectOptions, Connection, Row};

use crate::application::ports::{DbEndpoint, SqlGateway, SqlGatewayError, SqlOutcome};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One-off MySQL-protocol connections for probes and ad-hoc statements.
///
/// Both the source and the sink engine speak the MySQL wire protocol, so a
/// single adapter serves either side. Connections are opened per call and
/// closed right after; this surface is for interactive operator use, not a
/// query workload.
pub struct MySqlGateway;

impl MySqlGateway {
    pub fn new() -> Self {
        Self
    }

    async fn connect(&self, endpoint: &DbEndpoint) -> Result<MySqlConnection, SqlGatewayError> {
        let mut options = MySqlConnectOptions::new()
            .host(&endpoint.host)
            .port(endpoint.port)
            .username(&endpoint.username)
            .password(&endpoint.password);
        if let Some(database) = endpoint.database.as_deref().filter(|d| !d.is_empty()) {
            options = options.database(database);
        }

        tokio::time::timeout(CONNECT_TIMEOUT, options.connect())
            .await
            .map_err(|_| SqlGatewayError::ConnectionFailed("connect timed out".to_string()))?
            .map_err(|e| SqlGatewayError::ConnectionFailed(e.to_string()))
    }
}

impl Default for MySqlGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SqlGateway for MySqlGateway {
    async fn probe(&self, endpoint: &DbEndpoint) -> Result<(), SqlGatewayError> {
        let mut connection = self.connect(endpoint).await?;
        let result = sqlx::query("SELECT 1")
            .fetch_one(&mut connection)
            .await
            .map(|_| ())
            .map_err(|e| SqlGatewayError::QueryFailed(e.to_string()));
        let _ = connection.close().await;
        result
    }

    async fn execute(
        &self,
        endpoint: &DbEndpoint,
        sql: &str,
    ) -> Result<SqlOutcome, SqlGatewayError> {
        let mut connection = self.connect(endpoint).await?;
        let result = run_statement(&mut connection, sql).await;
        let _ = connection.close().await;
        result
    }
}

async fn run_statement(
    connection: &mut MySqlConnection,
    sql: &str,
) -> Result<SqlOutcome, SqlGatewayError> {
    if returns_rows(sql) {
        let rows = sqlx::query(sql)
            .fetch_all(connection)
            .await
            .map_err(|e| SqlGatewayError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let row_count = rows.len();
        let rows = rows.iter().map(row_to_json).collect();

        Ok(SqlOutcome::Rows {
            columns,
            rows,
            row_count,
        })
    } else {
        let result = sqlx::query(sql)
            .execute(connection)
            .await
            .map_err(|e| SqlGatewayError::QueryFailed(e.to_string()))?;
        Ok(SqlOutcome::Affected {
            rows: result.rows_affected(),
        })
    }
}

/// Whether the statement is query-shaped and should be fetched rather than
/// executed for its side effect.
fn returns_rows(sql: &str) -> bool {
    let head = sql.trim_start().to_ascii_uppercase();
    ["SELECT", "SHOW", "DESC", "DESCRIBE"]
        .iter()
        .any(|prefix| head.starts_with(prefix))
}

fn row_to_json(row: &MySqlRow) -> Value {
    let mut object = Map::new();
    for (index, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), cell_to_json(row, index));
    }
    Value::Object(object)
}

/// Decodes a cell without knowing the column type up front: statements arrive
/// at runtime, so the usual typed queries are not an option.
fn cell_to_json(row: &MySqlRow, index: usize) -> Value {
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<u64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<chrono::NaiveDateTime>, _>(index) {
        return value
            .map(|v| Value::from(v.to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return value
            .map(|v| Value::from(String::from_utf8_lossy(&v).into_owned()))
            .unwrap_or(Value::Null);
    }
    Value::Null
}
