//! Real socket round trip against the request loop.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

use picontrol_server::app_state::AppState;
use picontrol_server::config;
use picontrol_server::transport::udp;

#[tokio::test]
async fn serves_until_shutdown() {
    let cfg = config::load_from_str("version: 1\nserver:\n  listen: \"127.0.0.1:0\"\n").unwrap();
    let listen = cfg.server.listen_addr().unwrap();
    let app = AppState::new(cfg).unwrap();

    let socket = udp::bind(listen).await.unwrap();
    let addr = socket.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(udp::serve(app, socket, async move {
        let _ = stop_rx.await;
    }));

    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.connect(addr).await.unwrap();

    // Nothing comes back for a garbage datagram or a silent command...
    client.send(b"garbage").await.unwrap();
    client.send(br#"{"cmd":"test","id":0}"#).await.unwrap();

    // ...so the first reply belongs to serverInfo.
    client.send(br#"{"cmd":"serverInfo","id":"abc"}"#).await.unwrap();
    let mut buf = [0u8; 1024];
    let n = tokio::time::timeout(Duration::from_secs(5), client.recv(&mut buf))
        .await
        .expect("reply timed out")
        .unwrap();

    let reply: Value = serde_json::from_slice(&buf[..n]).unwrap();
    assert_eq!(
        reply,
        json!({"cmd": "serverInfo", "id": "abc", "success": true, "data": {"version": "0.0.1"}})
    );

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn bind_conflict_is_an_error() {
    let taken = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let err = udp::bind(taken.local_addr().unwrap()).await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}
