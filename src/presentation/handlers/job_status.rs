use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::JobLookupError;
use crate::domain::JobId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct JobStatusResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: String,
    #[serde(rename = "flinkJobId")]
    pub flink_job_id: Option<String>,
    /// Lines appended since the previous status request, not the full log.
    pub logs: Vec<String>,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "lastUpdate")]
    pub last_update: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid job ID: {}", job_id),
                }),
            )
                .into_response();
        }
    };

    match state.job_service.poll(JobId::from_uuid(uuid)).await {
        Ok(poll) => (
            StatusCode::OK,
            Json(JobStatusResponse {
                job_id: poll.job_id.to_string(),
                status: poll.state.as_str().to_string(),
                flink_job_id: poll.external_id,
                logs: poll.new_logs,
                start_time: poll.started_at.to_rfc3339(),
                last_update: poll.updated_at.to_rfc3339(),
            }),
        )
            .into_response(),
        Err(err @ JobLookupError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}
