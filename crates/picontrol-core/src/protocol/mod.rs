//! Wire protocol (JSON over UDP).
//!
//! One datagram carries one request; a reply, when the command produces one,
//! is a single datagram as well:
//! - `request`: inbound envelope with a lazily parsed `param` payload.
//! - `response`: reply envelope echoing `cmd` and `id`.
//! - `report`: the structured result of a `monitor` request.
//!
//! Decoding never panics: malformed input is reported as `PiControlError`.

pub mod report;
pub mod request;
pub mod response;

pub use report::{CategoryResult, ErrorMarker, MetricResult, MetricValue, Report};
pub use request::{MonitorParam, PlayParam, Request};
pub use response::{Response, SERVER_VERSION};
