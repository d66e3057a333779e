//! Probe command execution.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use picontrol_core::error::{PiControlError, Result};

use crate::config::MonitorSection;

/// Runs one probe command and returns its stdout.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<String>;
}

/// Runs table commands through `<shell> -c` with a time budget.
pub struct ShellRunner {
    shell: String,
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, timeout: Duration) -> Self {
        Self {
            shell: shell.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &MonitorSection) -> Self {
        Self::new(cfg.shell.clone(), Duration::from_millis(cfg.probe_timeout_ms))
    }
}

#[async_trait]
impl ProbeRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<String> {
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PiControlError::ProbeFailed(format!("spawn {} failed: {e}", self.shell)))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| PiControlError::ProbeTimeout(self.timeout.as_millis() as u64))?
            .map_err(|e| PiControlError::ProbeFailed(format!("wait failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PiControlError::ProbeFailed(format!(
                "{} ({})",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
