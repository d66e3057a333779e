//! Reply envelope.

use serde::Serialize;
use serde_json::Value;

use crate::protocol::request::Request;

/// Version string reported by `serverInfo`.
pub const SERVER_VERSION: &str = "0.0.1";

#[derive(Debug, Serialize)]
pub struct Response {
    pub cmd: String,
    pub id: Value,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub fn ok(req: &Request, data: Value) -> Self {
        Self {
            cmd: req.cmd.clone(),
            id: req.id.clone(),
            success: true,
            data: Some(data),
        }
    }

    pub fn failed(req: &Request) -> Self {
        Self {
            cmd: req.cmd.clone(),
            id: req.id.clone(),
            success: false,
            data: None,
        }
    }
}
