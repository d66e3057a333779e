//! Top-level facade crate for picontrol.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use picontrol_core::*;
}

pub mod server {
    pub use picontrol_server::*;
}
