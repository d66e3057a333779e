#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use picontrol_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:2222"
monitor:
  probe_timeout: 500 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:2222");
    assert_eq!(cfg.server.max_datagram_bytes, 1024);
    assert_eq!(cfg.monitor.probe_timeout_ms, 5000);
    assert_eq!(cfg.system.shutdown_command, ["sudo", "shutdown", "now"]);
    assert_eq!(cfg.playback.program, "cvlc");
    assert_eq!(cfg.playback.args, ["--preferred-resolution", "-1"]);
}

#[test]
fn sample_config_file_loads() {
    let cfg = config::load_from_file("../../picontrol.yaml").expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 2222);
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nserver:\n  listen: \"not-an-addr\"\n",
        "version: 1\nserver:\n  max_datagram_bytes: 100\n",
        "version: 1\nmonitor:\n  probe_timeout_ms: 0\n",
        "version: 1\nsystem:\n  shutdown_command: []\n",
        "version: 1\nplayback:\n  program: \"\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.client_code().as_str(), "INVALID_CONFIG", "{bad}");
    }
}
