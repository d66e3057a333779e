//! Datagram codec.
//!
//! - inbound datagram => `Request` (lazy `RawValue` for param)
//! - `Response` => outbound datagram

use bytes::Bytes;
use picontrol_core::{
    error::{PiControlError, Result},
    protocol::{Request, Response},
};

pub fn decode(datagram: &Bytes) -> Result<Request> {
    if datagram.is_empty() {
        return Err(PiControlError::BadRequest("empty datagram".into()));
    }
    Request::from_slice(datagram)
}

pub fn encode(resp: &Response) -> Result<Bytes> {
    serde_json::to_vec(resp)
        .map(Bytes::from)
        .map_err(|e| PiControlError::Internal(format!("response encode failed: {e}")))
}
