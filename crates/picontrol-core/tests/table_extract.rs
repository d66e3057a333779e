//! Built-in table against captured command output.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use picontrol_core::probe::{lookup, MetricCatalog, METRIC_TABLE};
use picontrol_core::protocol::{MetricResult, MetricValue};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

fn extract_category(category: &str, output: &str) -> Vec<MetricResult> {
    let catalog = MetricCatalog::builtin().unwrap();
    catalog
        .lookup(category)
        .unwrap()
        .probes()
        .iter()
        .flat_map(|p| p.extract(output).unwrap())
        .collect()
}

fn values(results: &[MetricResult]) -> Vec<(&str, MetricValue)> {
    results
        .iter()
        .map(|r| (r.name.as_str(), r.value.clone().unwrap()))
        .collect()
}

#[test]
fn builtin_table_compiles() {
    let catalog = MetricCatalog::builtin().unwrap();
    let names: Vec<&str> = catalog.categories().map(|c| c.name()).collect();
    assert_eq!(
        names,
        ["cpu", "raspberry", "memory", "network", "sdcard", "swap", "temperature", "uptime", "wlan"]
    );
}

#[test]
fn lookup_finds_table_entries_in_order() {
    let cpu = lookup("cpu").unwrap();
    let names: Vec<&str> = cpu.probes.iter().map(|p| p.name).collect();
    assert_eq!(names, ["cpu_frequency", "load1,load5,load15", "scaling_governor"]);
    assert!(lookup("bogus").is_none());
    assert_eq!(METRIC_TABLE.len(), 9);
}

#[test]
fn catalog_lookup_unknown_category() {
    let catalog = MetricCatalog::builtin().unwrap();
    let err = catalog.lookup("bogus").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNKNOWN_CATEGORY");
}

#[test]
fn load_average_splits_into_three_raw_values() {
    let catalog = MetricCatalog::builtin().unwrap();
    let probe = &catalog.lookup("cpu").unwrap().probes()[1];
    assert_eq!(probe.names(), ["load1", "load5", "load15"]);

    let out = probe.extract(&load("loadavg.txt")).unwrap();
    assert_eq!(
        values(&out),
        [
            ("load1", MetricValue::Text("0.12".into())),
            ("load5", MetricValue::Text("0.34".into())),
            ("load15", MetricValue::Text("0.56".into())),
        ]
    );
}

#[test]
fn memory_from_meminfo() {
    let out = extract_category("memory", &load("meminfo.txt"));
    assert_eq!(
        values(&out),
        [
            ("memory_total", MetricValue::Float(3884328.0 / 1024.0)),
            ("memory_free", MetricValue::Float(2645144.0 / 1024.0)),
            ("memory_available", MetricValue::Float(3323660.0 / 1024.0)),
        ]
    );
}

#[test]
fn swap_used_reports_swap_free() {
    let out = extract_category("swap", &load("meminfo.txt"));
    assert_eq!(
        values(&out),
        [
            ("swap_total", MetricValue::Float(102396.0 / 1024.0)),
            ("swap_used", MetricValue::Float(92156.0 / 1024.0)),
        ]
    );
}

#[test]
fn sdcard_columns_anchor_to_mount_point() {
    let catalog = MetricCatalog::builtin().unwrap();
    let probes = catalog.lookup("sdcard").unwrap().probes();
    let root = load("df_root.txt");
    let boot = load("df_boot.txt");

    let got: Vec<MetricResult> = probes
        .iter()
        .flat_map(|p| {
            let out = if p.command() == "df /" { &root } else { &boot };
            p.extract(out).unwrap()
        })
        .collect();

    assert_eq!(
        values(&got),
        [
            ("sdcard_root_total", MetricValue::Float(30428560.0 / 1024.0)),
            ("sdcard_boot_total", MetricValue::Float(258095.0 / 1024.0)),
            ("sdcard_root_used", MetricValue::Float(4710312.0 / 1024.0)),
            ("sdcard_boot_used", MetricValue::Float(50636.0 / 1024.0)),
        ]
    );
}

#[test]
fn root_pattern_does_not_match_boot_mount() {
    let catalog = MetricCatalog::builtin().unwrap();
    let root_total = &catalog.lookup("sdcard").unwrap().probes()[0];
    let err = root_total.extract(&load("df_boot.txt")).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "NO_MATCH");
}

#[test]
fn failed_probe_marks_every_name() {
    let catalog = MetricCatalog::builtin().unwrap();
    let probe = &catalog.lookup("cpu").unwrap().probes()[1];
    let err = probe.extract("").expect_err("must fail");
    let failed = probe.failed(&err);
    assert_eq!(failed.len(), 3);
    assert!(failed.iter().all(|r| !r.is_ok() && r.value.is_none()));
}
