#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use syncpilot::application::ports::{JobLauncher, LaunchError};
use syncpilot::infrastructure::cluster::{FlinkCliLauncher, extract_job_id};

const JOB_ID: &str = "0123456789abcdef0123456789abcdef";
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates a fake cluster install whose `bin/flink` runs the given script.
fn fake_flink_home(script_body: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let flink = bin.join("flink");
    std::fs::write(&flink, format!("#!/bin/sh\n{}\n", script_body)).unwrap();
    let mut permissions = std::fs::metadata(&flink).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&flink, permissions).unwrap();
    dir
}

fn launcher(home: &Path, timeout: Duration) -> FlinkCliLauncher {
    FlinkCliLauncher::new(
        home.to_path_buf(),
        "com.example.PipelineMain".to_string(),
        PathBuf::from("/opt/pipeline.jar"),
        timeout,
    )
}

fn config_document(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("pipeline.yaml");
    std::fs::write(&path, "pipeline:\n  name: test\n").unwrap();
    path
}

#[test]
fn given_submit_output_with_job_id_line_when_extracting_then_id_is_returned() {
    let output = format!("some banner\nJob has been submitted with JobID {}\n", JOB_ID);
    assert_eq!(extract_job_id(&output), Some(JOB_ID.to_string()));
}

#[test]
fn given_mixed_case_job_id_line_when_extracting_then_match_is_case_insensitive() {
    let output = format!("JOB HAS BEEN SUBMITTED WITH JOBID {}", JOB_ID);
    assert_eq!(extract_job_id(&output), Some(JOB_ID.to_string()));
}

#[test]
fn given_output_without_job_id_line_when_extracting_then_nothing_is_returned() {
    assert_eq!(extract_job_id("Submitting job...\nDone."), None);
    assert_eq!(extract_job_id(""), None);
    // A short token is not a job id.
    assert_eq!(
        extract_job_id("Job has been submitted with JobID abc123"),
        None
    );
}

#[tokio::test]
async fn given_submit_command_printing_job_id_when_launching_then_id_is_extracted() {
    let home = fake_flink_home(&format!(
        "echo \"Job has been submitted with JobID {}\"",
        JOB_ID
    ));
    let documents = tempfile::tempdir().unwrap();
    let document = config_document(&documents);

    let outcome = launcher(home.path(), SUBMIT_TIMEOUT)
        .launch(&document, 2, 10)
        .await
        .unwrap();

    assert_eq!(outcome.external_id.as_deref(), Some(JOB_ID));
    assert!(outcome.initial_logs.iter().any(|l| l.contains(JOB_ID)));
    assert!(outcome.process.is_some());
}

#[tokio::test]
async fn given_submit_command_without_job_id_when_launching_then_output_preview_is_logged() {
    let home = fake_flink_home("echo \"cluster not reachable\" >&2");
    let documents = tempfile::tempdir().unwrap();
    let document = config_document(&documents);

    let outcome = launcher(home.path(), SUBMIT_TIMEOUT)
        .launch(&document, 2, 10)
        .await
        .unwrap();

    assert_eq!(outcome.external_id, None);
    assert!(
        outcome
            .initial_logs
            .iter()
            .any(|l| l.contains("submit output:") && l.contains("cluster not reachable"))
    );
}

#[tokio::test]
async fn given_checkpoint_and_parallelism_when_launching_then_dynamic_properties_are_passed() {
    // The fake echoes the two -D values it was handed.
    let home = fake_flink_home("echo \"$4 $6\"");
    let documents = tempfile::tempdir().unwrap();
    let document = config_document(&documents);

    let outcome = launcher(home.path(), SUBMIT_TIMEOUT)
        .launch(&document, 2, 10)
        .await
        .unwrap();

    let preview = outcome
        .initial_logs
        .iter()
        .find(|l| l.contains("submit output:"))
        .expect("preview line");
    assert!(preview.contains("execution.checkpointing.interval=10s"));
    assert!(preview.contains("parallelism.default=2"));
}

#[tokio::test]
async fn given_missing_submit_binary_when_launching_then_spawn_error_is_returned() {
    let home = tempfile::tempdir().unwrap();
    let documents = tempfile::tempdir().unwrap();
    let document = config_document(&documents);

    let result = launcher(home.path(), SUBMIT_TIMEOUT)
        .launch(&document, 2, 10)
        .await;

    assert!(matches!(result, Err(LaunchError::Spawn(_))));
}

#[tokio::test]
async fn given_hanging_submit_command_when_launching_then_partial_output_is_still_scanned() {
    let home = fake_flink_home(&format!(
        "echo \"Job has been submitted with JobID {}\"\nexec sleep 30",
        JOB_ID
    ));
    let documents = tempfile::tempdir().unwrap();
    let document = config_document(&documents);

    let outcome = launcher(home.path(), Duration::from_millis(200))
        .launch(&document, 2, 10)
        .await
        .unwrap();

    assert_eq!(outcome.external_id.as_deref(), Some(JOB_ID));
    assert!(outcome.initial_logs.iter().any(|l| l.contains("timed out")));
}
