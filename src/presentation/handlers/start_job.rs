use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::SubmitError;
use crate::domain::SyncJobConfig;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct StartJobResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: String,
    #[serde(rename = "flinkJobId")]
    pub flink_job_id: Option<String>,
    pub logs: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, config))]
pub async fn start_job_handler(
    State(state): State<AppState>,
    Json(config): Json<SyncJobConfig>,
) -> impl IntoResponse {
    match state.job_service.submit(config).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(StartJobResponse {
                job_id: outcome.job_id.to_string(),
                status: outcome.state.as_str().to_string(),
                flink_job_id: outcome.external_id,
                logs: outcome.initial_logs,
            }),
        )
            .into_response(),
        Err(err @ SubmitError::Config(_)) => {
            tracing::warn!(error = %err, "submission rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "submission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
