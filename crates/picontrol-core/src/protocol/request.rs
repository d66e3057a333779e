//! Inbound request envelope.
//!
//! The core stores `param` as `RawValue` so each command handler parses only
//! the shape it needs.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::error::{PiControlError, Result};

/// Request envelope (one per datagram).
#[derive(Debug, Deserialize)]
pub struct Request {
    /// Command name (e.g., "monitor").
    pub cmd: String,
    /// Caller-chosen identifier, echoed back unchanged.
    #[serde(default)]
    pub id: Value,
    /// Optional payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub param: Option<Box<RawValue>>,
}

impl Request {
    /// Decode a request from raw datagram bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| PiControlError::BadRequest(format!("invalid request json: {e}")))
    }

    /// Parse `param` into the handler-specific shape.
    pub fn param<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self
            .param
            .as_ref()
            .ok_or_else(|| PiControlError::BadRequest(format!("{} requires param", self.cmd)))?;
        serde_json::from_str(raw.get())
            .map_err(|e| PiControlError::BadRequest(format!("{} invalid param: {e}", self.cmd)))
    }
}

/// `monitor` payload: category name -> include flag.
#[derive(Debug, Deserialize)]
pub struct MonitorParam {
    pub components: Map<String, Value>,
}

impl MonitorParam {
    /// Categories whose flag is literally `true`, in request order.
    pub fn requested(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|(_, flag)| matches!(flag, Value::Bool(true)))
            .map(|(name, _)| name.as_str())
    }
}

/// `playVideo` payload.
#[derive(Debug, Deserialize)]
pub struct PlayParam {
    pub url: String,
}
