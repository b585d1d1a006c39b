use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::application::ports::{JobLauncher, LaunchError, LaunchOutcome};
use crate::domain::ProcessHandle;

use super::child_process::ChildProcessHandle;

/// The cluster CLI prints this on a successful submission, followed by the
/// 32-hex job identifier.
static JOB_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Job\s+has\s+been\s+submitted\s+with\s+JobID\s+([0-9a-f]{32})")
        .unwrap_or_else(|e| panic!("invalid job id pattern: {e}"))
});

const OUTPUT_PREVIEW_CHARS: usize = 200;

/// Submits pipelines through the cluster's `flink run` command line.
///
/// The command is started detached (`-d`): it prints the assigned job id and
/// exits, while the pipeline itself keeps running on the cluster.
pub struct FlinkCliLauncher {
    flink_home: PathBuf,
    entry_class: String,
    pipeline_jar: PathBuf,
    submit_timeout: Duration,
}

impl FlinkCliLauncher {
    pub fn new(
        flink_home: PathBuf,
        entry_class: String,
        pipeline_jar: PathBuf,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            flink_home,
            entry_class,
            pipeline_jar,
            submit_timeout,
        }
    }
}

#[async_trait]
impl JobLauncher for FlinkCliLauncher {
    async fn launch(
        &self,
        config_document: &Path,
        parallelism: u32,
        checkpoint_interval_secs: u64,
    ) -> Result<LaunchOutcome, LaunchError> {
        let mut command = Command::new(self.flink_home.join("bin/flink"));
        command
            .arg("run")
            .arg("-d")
            .arg("-D")
            .arg(format!(
                "execution.checkpointing.interval={}s",
                checkpoint_interval_secs
            ))
            .arg("-D")
            .arg(format!("parallelism.default={}", parallelism))
            .arg("-c")
            .arg(&self.entry_class)
            .arg(&self.pipeline_jar)
            .arg("-config")
            .arg(config_document)
            .arg("--skip-confirm")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| LaunchError::Spawn(e.to_string()))?;

        let stdout_task = tokio::spawn(read_to_string(child.stdout.take()));
        let stderr_task = tokio::spawn(read_to_string(child.stderr.take()));

        let timed_out = match tokio::time::timeout(self.submit_timeout, child.wait()).await {
            Ok(_) => false,
            Err(_) => {
                tracing::warn!(
                    document = %config_document.display(),
                    "submit command did not exit in time, killing it"
                );
                let _ = child.start_kill();
                true
            }
        };

        // The readers hit end-of-stream once the command exits or is killed,
        // so output gathered up to that point is still scanned for an id.
        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let output = format!("{}{}", stdout, stderr);

        let external_id = extract_job_id(&output);
        let initial_logs = initial_log_lines(external_id.as_deref(), &output, timed_out);

        let process: Box<dyn ProcessHandle> = Box::new(ChildProcessHandle::new(child));
        Ok(LaunchOutcome {
            external_id,
            initial_logs,
            process: Some(process),
        })
    }
}

/// Extracts the externally assigned job identifier from submit output.
pub fn extract_job_id(output: &str) -> Option<String> {
    JOB_ID_PATTERN
        .captures(output)
        .map(|captures| captures[1].to_string())
}

fn initial_log_lines(external_id: Option<&str>, output: &str, timed_out: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if timed_out {
        lines.push("submit command timed out, scanning partial output for a job id".to_string());
    }
    match external_id {
        Some(id) => {
            lines.push(format!("job submitted to the cluster with job id {}", id));
        }
        None => {
            lines.push("job submitted, waiting for the cluster to report an id".to_string());
            lines.push(format!("submit output: {}", preview(output)));
        }
    }
    lines
}

fn preview(output: &str) -> &str {
    match output.char_indices().nth(OUTPUT_PREVIEW_CHARS) {
        Some((idx, _)) => &output[..idx],
        None => output,
    }
}

async fn read_to_string<R: AsyncRead + Unpin>(stream: Option<R>) -> String {
    let mut text = String::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_string(&mut text).await;
    }
    text
}
