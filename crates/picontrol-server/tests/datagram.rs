//! Request handling from raw datagram to raw reply.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use picontrol_core::error::{PiControlError, Result};
use picontrol_server::app_state::AppState;
use picontrol_server::config::ServerConfig;
use picontrol_server::monitor::ProbeRunner;
use picontrol_server::transport::udp::handle_datagram;

struct UptimeOnly;

#[async_trait]
impl ProbeRunner for UptimeOnly {
    async fn run(&self, command: &str) -> Result<String> {
        match command {
            "cat /proc/uptime" => Ok("42.50 80.00\n".into()),
            other => Err(PiControlError::ProbeFailed(format!("not scripted: {other}"))),
        }
    }
}

fn app() -> AppState {
    AppState::with_runner(ServerConfig::default(), Arc::new(UptimeOnly)).unwrap()
}

async fn roundtrip(app: &AppState, raw: &'static [u8]) -> Option<Value> {
    handle_datagram(app, Bytes::from_static(raw))
        .await
        .map(|b| serde_json::from_slice(&b).unwrap())
}

#[tokio::test]
async fn server_info_always_answers() {
    let reply = roundtrip(&app(), br#"{"cmd":"serverInfo","id":17}"#).await;
    assert_eq!(
        reply,
        Some(json!({"cmd": "serverInfo", "id": 17, "success": true, "data": {"version": "0.0.1"}}))
    );
}

#[tokio::test]
async fn monitor_replies_with_report() {
    let reply = roundtrip(
        &app(),
        br#"{"cmd":"monitor","id":"m1","param":{"components":{"uptime":true,"bogus":true}}}"#,
    )
    .await
    .unwrap();

    assert_eq!(reply["cmd"], "monitor");
    assert_eq!(reply["id"], "m1");
    assert_eq!(reply["success"], true);
    assert_eq!(reply["data"][0], json!({"name": "uptime", "data": [{"name": "uptime", "value": 42.5}]}));
    assert_eq!(reply["data"][1]["name"], "bogus");
    assert_eq!(reply["data"][1]["data"], json!([]));
    assert_eq!(reply["data"][1]["error"]["code"], "UNKNOWN_CATEGORY");
}

#[tokio::test]
async fn monitor_without_components_fails_softly() {
    let reply = roundtrip(&app(), br#"{"cmd":"monitor","id":3}"#).await;
    assert_eq!(reply, Some(json!({"cmd": "monitor", "id": 3, "success": false})));
}

#[tokio::test]
async fn silent_commands_do_not_reply() {
    let app = app();
    assert_eq!(roundtrip(&app, br#"{"cmd":"test","id":1}"#).await, None);
    assert_eq!(roundtrip(&app, br#"{"cmd":"stopVideo","id":2}"#).await, None);
    assert_eq!(roundtrip(&app, br#"{"cmd":"playVideo","id":3}"#).await, None);
}

#[tokio::test]
async fn unknown_or_malformed_input_is_dropped() {
    let app = app();
    assert_eq!(roundtrip(&app, br#"{"cmd":"reboot","id":1}"#).await, None);
    assert_eq!(roundtrip(&app, b"").await, None);
    assert_eq!(roundtrip(&app, b"{not json").await, None);
    assert_eq!(roundtrip(&app, br#"{"id":1}"#).await, None);

    // still serving afterwards
    assert!(roundtrip(&app, br#"{"cmd":"serverInfo","id":2}"#).await.is_some());
}

#[test]
fn every_command_is_registered() {
    let app = app();
    let mut cmds = app.dispatcher().registered_cmds();
    cmds.sort_unstable();
    assert_eq!(
        cmds,
        ["monitor", "playVideo", "serverInfo", "shutdown", "stopVideo", "test", "uname"]
    );
}
