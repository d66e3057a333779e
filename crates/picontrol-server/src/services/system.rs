//! One-shot system commands: `shutdown`, `test`, `serverInfo`, `uname`.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;

use picontrol_core::error::{PiControlError, Result};
use picontrol_core::protocol::{Request, SERVER_VERSION};

use crate::dispatch::CommandHandler;

/// Powers the board off through the configured argv.
pub struct ShutdownService {
    argv: Vec<String>,
}

impl ShutdownService {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

#[async_trait]
impl CommandHandler for ShutdownService {
    fn cmd(&self) -> &'static str {
        "shutdown"
    }

    async fn handle(&self, _req: &Request) -> Result<Value> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| PiControlError::Internal("shutdown command is empty".into()))?;

        tracing::warn!(command = ?self.argv, "shutting down");
        let status = Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| PiControlError::Internal(format!("run {program} failed: {e}")))?;

        if !status.success() {
            return Err(PiControlError::Internal(format!("shutdown exited with {status}")));
        }
        Ok(Value::Null)
    }
}

/// Liveness ping; only logged.
#[derive(Default)]
pub struct TestService;

impl TestService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for TestService {
    fn cmd(&self) -> &'static str {
        "test"
    }

    async fn handle(&self, req: &Request) -> Result<Value> {
        tracing::info!(id = %req.id, "received test");
        Ok(Value::Null)
    }
}

#[derive(Default)]
pub struct ServerInfoService;

impl ServerInfoService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for ServerInfoService {
    fn cmd(&self) -> &'static str {
        "serverInfo"
    }

    fn replies(&self) -> bool {
        true
    }

    async fn handle(&self, _req: &Request) -> Result<Value> {
        Ok(json!({ "version": SERVER_VERSION }))
    }
}

/// Logs `uname -a` of the host.
#[derive(Default)]
pub struct UnameService;

impl UnameService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandHandler for UnameService {
    fn cmd(&self) -> &'static str {
        "uname"
    }

    async fn handle(&self, _req: &Request) -> Result<Value> {
        let output = Command::new("uname")
            .arg("-a")
            .output()
            .await
            .map_err(|e| PiControlError::Internal(format!("run uname failed: {e}")))?;

        let uname = String::from_utf8_lossy(&output.stdout);
        tracing::info!(uname = %uname.trim(), "uname");
        Ok(Value::Null)
    }
}
