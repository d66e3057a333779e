//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use picontrol_core::error::{PiControlError, Result};

pub use schema::{MonitorSection, PlaybackSection, ServerConfig, ServerSection, SystemSection};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "PICONTROL_CONFIG";
/// Looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "picontrol.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PiControlError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| PiControlError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// `$PICONTROL_CONFIG` if set, else `picontrol.yaml` if present, else defaults.
pub fn load() -> Result<ServerConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return load_from_file(&path);
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_from_file(DEFAULT_CONFIG_PATH);
    }
    tracing::info!("no config file found, using built-in defaults");
    let cfg = ServerConfig::default();
    cfg.validate()?;
    Ok(cfg)
}
