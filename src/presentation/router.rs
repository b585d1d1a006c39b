use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    execute_sql_handler, health_flink_handler, health_handler, health_oceanbase_handler,
    health_starrocks_handler, job_status_handler, start_job_handler, stop_job_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    // The console is served from a separate origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/health/starrocks", post(health_starrocks_handler))
        .route("/api/health/oceanbase", post(health_oceanbase_handler))
        .route("/api/health/flink", get(health_flink_handler))
        .route("/api/start-job", post(start_job_handler))
        .route("/api/job-status/{job_id}", get(job_status_handler))
        .route("/api/stop-job/{job_id}", post(stop_job_handler))
        .route("/api/execute-sql", post(execute_sql_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
