mod cancellation;
mod config_materializer;
mod job_registry;
mod job_service;
mod status_reconciler;

pub use cancellation::{CancelRejected, CancellationCoordinator, CancellationOptions};
pub use config_materializer::materialize_pipeline_config;
pub use job_registry::JobRegistry;
pub use job_service::{
    CancelServiceError, JobLookupError, JobService, JobServiceOptions, PollOutcome, SubmitError,
    SubmitOutcome,
};
pub use status_reconciler::StatusReconciler;
