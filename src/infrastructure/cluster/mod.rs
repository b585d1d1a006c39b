mod child_process;
mod flink_cli_launcher;
mod flink_rest_client;

pub use child_process::ChildProcessHandle;
pub use flink_cli_launcher::{FlinkCliLauncher, extract_job_id};
pub use flink_rest_client::FlinkRestClient;
