use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Child;

use crate::domain::{ProcessHandle, ProcessHandleError};

/// Owned handle over the spawned submit command.
pub struct ChildProcessHandle {
    child: Child,
}

impl ChildProcessHandle {
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    #[cfg(unix)]
    fn request_termination(&self) -> Result<(), ProcessHandleError> {
        let Some(pid) = self.child.id() else {
            // Already exited.
            return Ok(());
        };
        // SAFETY: plain kill(2) on a pid we own.
        let result = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if result == 0 {
            Ok(())
        } else {
            Err(ProcessHandleError::Signal(
                std::io::Error::last_os_error().to_string(),
            ))
        }
    }

    #[cfg(not(unix))]
    fn request_termination(&mut self) -> Result<(), ProcessHandleError> {
        self.child
            .start_kill()
            .map_err(|e| ProcessHandleError::Signal(e.to_string()))
    }
}

#[async_trait]
impl ProcessHandle for ChildProcessHandle {
    async fn shutdown(mut self: Box<Self>, grace: Duration) -> Result<(), ProcessHandleError> {
        if self.child.id().is_none() {
            // Already exited, only reap it.
            let _ = self.child.wait().await;
            return Ok(());
        }

        self.request_termination()?;

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(Ok(_status)) => Ok(()),
            Ok(Err(e)) => Err(ProcessHandleError::Wait(e.to_string())),
            Err(_elapsed) => {
                self.child
                    .kill()
                    .await
                    .map_err(|e| ProcessHandleError::Kill(e.to_string()))
            }
        }
    }
}
