//! Telemetry collection for the `monitor` command.

pub mod engine;
pub mod runner;

pub use engine::MonitorEngine;
pub use runner::{ProbeRunner, ShellRunner};
