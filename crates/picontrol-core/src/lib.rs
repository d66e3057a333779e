//! picontrol core: transport-agnostic protocol primitives, error types, and the
//! metric table.
//!
//! This crate defines the wire-level contracts, the probe catalog and the
//! extraction rules shared by the server and any client tooling. It carries no
//! runtime dependencies; running probe commands is the server's job.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PiControlError`/`Result` so a malformed
//! datagram or odd command output never takes the daemon down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod probe;
pub mod protocol;

/// Shared result type.
pub use error::{PiControlError, Result};
