//! Metric extraction engine.
//!
//! Walks the requested categories in request order and the probes of each
//! category in table order. Every failure is isolated to the metrics of the
//! probe that failed; an unknown category becomes an entry with an error and
//! no data.

use std::sync::Arc;

use picontrol_core::error::Result;
use picontrol_core::probe::{CompiledCategory, CompiledProbe, MetricCatalog};
use picontrol_core::protocol::{CategoryResult, MetricResult, MonitorParam, Report};

use crate::monitor::runner::ProbeRunner;

#[derive(Clone)]
pub struct MonitorEngine {
    catalog: Arc<MetricCatalog>,
    runner: Arc<dyn ProbeRunner>,
}

impl MonitorEngine {
    pub fn new(catalog: Arc<MetricCatalog>, runner: Arc<dyn ProbeRunner>) -> Self {
        Self { catalog, runner }
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub async fn report(&self, param: &MonitorParam) -> Report {
        let mut report = Vec::new();
        for name in param.requested() {
            match self.catalog.lookup(name) {
                Ok(category) => report.push(self.probe_category(category).await),
                Err(e) => {
                    tracing::warn!(category = %name, "requested category is not in the metric table");
                    report.push(CategoryResult::failed(name, &e));
                }
            }
        }
        report
    }

    pub async fn probe_category(&self, category: &CompiledCategory) -> CategoryResult {
        let mut out = CategoryResult::new(category.name());
        for probe in category.probes() {
            match self.run_probe(probe).await {
                Ok(results) => out.data.extend(results),
                Err(e) => {
                    tracing::debug!(
                        category = category.name(),
                        probe = probe.def().name,
                        code = e.client_code().as_str(),
                        error = %e,
                        "probe failed"
                    );
                    out.data.extend(probe.failed(&e));
                }
            }
        }
        out
    }

    async fn run_probe(&self, probe: &CompiledProbe) -> Result<Vec<MetricResult>> {
        let raw = self.runner.run(probe.command()).await?;
        probe.extract(&raw)
    }
}
