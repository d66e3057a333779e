use async_trait::async_trait;
use serde_json::Value;

use picontrol_core::error::{PiControlError, Result};
use picontrol_core::protocol::{MonitorParam, Request};

use crate::dispatch::CommandHandler;
use crate::monitor::MonitorEngine;

/// `monitor`: probe the requested categories and reply with the report.
pub struct MonitorService {
    engine: MonitorEngine,
}

impl MonitorService {
    pub fn new(engine: MonitorEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl CommandHandler for MonitorService {
    fn cmd(&self) -> &'static str {
        "monitor"
    }

    fn replies(&self) -> bool {
        true
    }

    async fn handle(&self, req: &Request) -> Result<Value> {
        let param: MonitorParam = req.param()?;
        let report = self.engine.report(&param).await;

        let failed = report
            .iter()
            .flat_map(|c| c.data.iter())
            .filter(|m| !m.is_ok())
            .count();
        tracing::debug!(categories = report.len(), failed, "monitor report built");

        serde_json::to_value(report)
            .map_err(|e| PiControlError::Internal(format!("report encode failed: {e}")))
    }
}
