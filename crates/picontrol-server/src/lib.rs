//! picontrol server library entry.
//!
//! This crate wires the UDP transport, the dispatcher, the monitor engine and
//! the side-effect services into the daemon. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod monitor;
pub mod services;
pub mod transport;
