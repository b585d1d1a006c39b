use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::DbEndpoint;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: String,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            connected: true,
            message: Some(message.into()),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            connected: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

#[tracing::instrument(skip(state, body))]
pub async fn health_starrocks_handler(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Response {
    probe_database(&state, body, "starrocks", "StarRocks").await
}

#[tracing::instrument(skip(state, body))]
pub async fn health_oceanbase_handler(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Response {
    probe_database(&state, body, "oceanbase", "OceanBase").await
}

/// Accepts either `{"<section>": {...connection...}}` or the flat connection
/// object itself, then opens a short-lived connection and runs `SELECT 1`.
async fn probe_database(
    state: &AppState,
    body: Option<Json<Value>>,
    section: &str,
    label: &str,
) -> Response {
    let data = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let config = if let Some(nested) = data.get(section).filter(|v| v.is_object()) {
        nested.clone()
    } else {
        data
    };

    let provided = config
        .as_object()
        .map(|object| !object.is_empty())
        .unwrap_or(false);
    if !provided {
        return (
            StatusCode::BAD_REQUEST,
            Json(ProbeResponse::failed(format!(
                "no {} config provided",
                label
            ))),
        )
            .into_response();
    }

    let endpoint: DbEndpoint = match serde_json::from_value(config) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeResponse::failed(format!(
                    "invalid {} config: {}",
                    label, e
                ))),
            )
                .into_response();
        }
    };

    match state.sql_gateway.probe(&endpoint).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeResponse::ok(format!("{} connection succeeded", label))),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(database = label, error = %e, "connection probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn health_flink_handler(State(state): State<AppState>) -> Response {
    match state.cluster.overview().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeResponse::ok("Flink cluster is reachable")),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "cluster liveness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeResponse::failed(e.to_string())),
            )
                .into_response()
        }
    }
}
