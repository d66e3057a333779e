//! Transport layer (UDP).
//!
//! Exposes the request loop and the codec that decodes each datagram once
//! before it reaches the dispatcher.

pub mod codec;
pub mod udp;
