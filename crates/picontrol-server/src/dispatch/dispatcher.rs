use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use picontrol_core::error::{PiControlError, Result};
use picontrol_core::protocol::{Request, Response};

/// One command (`cmd`) of the wire protocol.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn cmd(&self) -> &'static str;

    /// Whether the command answers with a datagram.
    fn replies(&self) -> bool {
        false
    }

    /// Returned data becomes the reply's `data` when `replies()` is true.
    async fn handle(&self, req: &Request) -> Result<Value>;
}

/// Registry and dispatcher for command handlers.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    pub fn register(&self, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(handler.cmd(), handler);
    }

    pub fn registered_cmds(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    /// Run the handler for `req.cmd`.
    ///
    /// `Ok(None)` means the command does not reply. Handler errors on replying
    /// commands become `success: false`; on the others they are only logged.
    pub async fn dispatch(&self, req: &Request) -> Result<Option<Response>> {
        let cmd = req.cmd.as_str();
        let handler = self
            .handlers
            .get(cmd)
            .ok_or_else(|| PiControlError::UnknownCommand(cmd.to_string()))?
            .value()
            .clone();

        let outcome = handler.handle(req).await;
        match (handler.replies(), outcome) {
            (true, Ok(data)) => Ok(Some(Response::ok(req, data))),
            (true, Err(e)) => {
                tracing::warn!(cmd, code = e.client_code().as_str(), error = %e, "command failed");
                Ok(Some(Response::failed(req)))
            }
            (false, Ok(_)) => Ok(None),
            (false, Err(e)) => {
                tracing::warn!(cmd, code = e.client_code().as_str(), error = %e, "command failed");
                Ok(None)
            }
        }
    }
}
