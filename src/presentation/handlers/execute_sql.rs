use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{DbEndpoint, SqlOutcome};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ExecuteSqlRequest {
    #[serde(rename = "dbType")]
    pub db_type: Option<String>,
    pub sql: Option<String>,
    pub config: Option<Value>,
}

#[derive(Serialize)]
pub struct QueryRowsResponse {
    pub success: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Value>,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
}

#[derive(Serialize)]
pub struct AffectedRowsResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "affectedRows")]
    pub affected_rows: u64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn execute_sql_handler(
    State(state): State<AppState>,
    Json(request): Json<ExecuteSqlRequest>,
) -> Response {
    let sql = request.sql.unwrap_or_default();
    if sql.trim().is_empty() {
        return bad_request("SQL statement must not be empty");
    }

    let Some(config) = request.config else {
        return bad_request("database config must not be empty");
    };

    match request.db_type.as_deref() {
        Some("starrocks") | Some("oceanbase") => {}
        _ => return bad_request("unsupported database type"),
    }

    let endpoint: DbEndpoint = match serde_json::from_value(config) {
        Ok(endpoint) => endpoint,
        Err(e) => return bad_request(format!("invalid database config: {}", e)),
    };

    match state.sql_gateway.execute(&endpoint, &sql).await {
        Ok(SqlOutcome::Rows {
            columns,
            rows,
            row_count,
        }) => (
            StatusCode::OK,
            Json(QueryRowsResponse {
                success: true,
                columns,
                rows,
                row_count,
            }),
        )
            .into_response(),
        Ok(SqlOutcome::Affected { rows }) => (
            StatusCode::OK,
            Json(AffectedRowsResponse {
                success: true,
                message: format!("statement affected {} rows", rows),
                affected_rows: rows,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "ad-hoc statement failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(error: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
