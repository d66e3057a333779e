//! Media player process control (`playVideo` / `stopVideo`).
//!
//! At most one player runs at a time. The child handle lives in `Player`
//! behind an async mutex; starting always stops the previous instance first.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use picontrol_core::error::{PiControlError, Result};
use picontrol_core::protocol::{PlayParam, Request};

use crate::config::PlaybackSection;
use crate::dispatch::CommandHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NothingPlaying,
}

pub struct Player {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl Player {
    pub fn new(cfg: &PlaybackSection) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
            current: Mutex::new(None),
        }
    }

    /// Stop whatever is playing, then launch `<program> <args..> <url>`.
    pub async fn start(&self, url: &str) -> Result<()> {
        if url.is_empty() || url.starts_with('-') {
            return Err(PiControlError::BadRequest(format!("invalid url: {url:?}")));
        }

        let mut current = self.current.lock().await;
        stop_child(&mut current).await?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PiControlError::Internal(format!("spawn {} failed: {e}", self.program)))?;

        tracing::info!(pid = ?child.id(), %url, "starting video");
        *current = Some(child);
        Ok(())
    }

    pub async fn stop(&self) -> Result<StopOutcome> {
        let mut current = self.current.lock().await;
        stop_child(&mut current).await
    }

    pub async fn is_playing(&self) -> bool {
        let mut current = self.current.lock().await;
        match current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

async fn stop_child(slot: &mut Option<Child>) -> Result<StopOutcome> {
    let Some(mut child) = slot.take() else {
        tracing::info!("no video playing");
        return Ok(StopOutcome::NothingPlaying);
    };

    match child.try_wait() {
        Ok(Some(status)) => {
            tracing::info!(%status, "no video playing");
            Ok(StopOutcome::NothingPlaying)
        }
        Ok(None) => {
            tracing::info!(pid = ?child.id(), "trying to stop playing video");
            child
                .kill()
                .await
                .map_err(|e| PiControlError::Internal(format!("stop player failed: {e}")))?;
            tracing::info!("video stopped");
            Ok(StopOutcome::Stopped)
        }
        Err(e) => Err(PiControlError::Internal(format!("player status unknown: {e}"))),
    }
}

pub struct PlayVideoService {
    player: Arc<Player>,
}

impl PlayVideoService {
    pub fn new(player: Arc<Player>) -> Self {
        Self { player }
    }
}

#[async_trait]
impl CommandHandler for PlayVideoService {
    fn cmd(&self) -> &'static str {
        "playVideo"
    }

    async fn handle(&self, req: &Request) -> Result<Value> {
        let param: PlayParam = req.param()?;
        self.player.start(&param.url).await?;
        Ok(Value::Null)
    }
}

pub struct StopVideoService {
    player: Arc<Player>,
}

impl StopVideoService {
    pub fn new(player: Arc<Player>) -> Self {
        Self { player }
    }
}

#[async_trait]
impl CommandHandler for StopVideoService {
    fn cmd(&self) -> &'static str {
        "stopVideo"
    }

    async fn handle(&self, _req: &Request) -> Result<Value> {
        self.player.stop().await?;
        Ok(Value::Null)
    }
}
