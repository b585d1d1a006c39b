mod job_id;
mod job_record;
mod job_state;
mod pipeline_config;
mod process_handle;

pub use job_id::JobId;
pub use job_record::JobRecord;
pub use job_state::JobState;
pub use pipeline_config::{
    ConfigError, ConfigValue, OceanBaseConfig, PipelineOptions, StarRocksConfig, SyncJobConfig,
};
pub use process_handle::{ProcessHandle, ProcessHandleError};
