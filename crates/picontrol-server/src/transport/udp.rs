//! UDP request loop.
//!
//! One socket, one request at a time: receive a datagram, handle it fully,
//! send at most one reply, repeat. A slow probe delays everything behind it.

use std::future::Future;
use std::net::SocketAddr;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tracing::Instrument;

use picontrol_core::error::{PiControlError, Result};

use crate::app_state::AppState;
use crate::transport::codec;

pub async fn bind(listen: SocketAddr) -> Result<UdpSocket> {
    UdpSocket::bind(listen)
        .await
        .map_err(|e| PiControlError::Internal(format!("bind {listen} failed: {e}")))
}

/// Serve requests until `shutdown` resolves.
pub async fn serve<F>(app: AppState, socket: UdpSocket, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let mut buf = vec![0u8; app.cfg().server.max_datagram_bytes];
    tokio::pin!(shutdown);

    loop {
        let (n, peer) = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received, stopping request loop");
                return Ok(());
            }
            recv = socket.recv_from(&mut buf) => match recv {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "recv failed");
                    continue;
                }
            },
        };

        let datagram = Bytes::copy_from_slice(&buf[..n]);
        let span = tracing::info_span!("request", %peer, bytes = n);
        let Some(reply) = handle_datagram(&app, datagram).instrument(span).await else {
            continue;
        };

        if let Err(e) = socket.send_to(&reply, peer).await {
            tracing::warn!(%peer, error = %e, "send failed");
        }
    }
}

/// Decode, dispatch and encode one datagram. `None` means no reply is sent.
pub async fn handle_datagram(app: &AppState, datagram: Bytes) -> Option<Bytes> {
    let req = match codec::decode(&datagram) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "dropping undecodable datagram");
            return None;
        }
    };

    let resp = match app.dispatcher().dispatch(&req).await {
        Ok(Some(resp)) => resp,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(cmd = %req.cmd, error = %e, "unknown command");
            return None;
        }
    };

    match codec::encode(&resp) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::error!(cmd = %req.cmd, error = %e, "dropping reply");
            None
        }
    }
}
