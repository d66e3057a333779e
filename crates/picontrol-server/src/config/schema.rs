use std::net::SocketAddr;

use serde::Deserialize;
use picontrol_core::error::{PiControlError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub system: SystemSection,

    #[serde(default)]
    pub playback: PlaybackSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            monitor: MonitorSection::default(),
            system: SystemSection::default(),
            playback: PlaybackSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PiControlError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.monitor.validate()?;
        self.system.validate()?;
        self.playback.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_datagram_bytes")]
    pub max_datagram_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_datagram_bytes: default_max_datagram_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        // 65507 is the largest UDP payload over IPv4.
        if !(512..=65507).contains(&self.max_datagram_bytes) {
            return Err(PiControlError::InvalidConfig(
                "server.max_datagram_bytes must be between 512 and 65507".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PiControlError::InvalidConfig(format!(
                "server.listen must be a valid SocketAddr ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:2222".into()
}
fn default_max_datagram_bytes() -> usize {
    1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl MonitorSection {
    pub fn validate(&self) -> Result<()> {
        if self.shell.trim().is_empty() {
            return Err(PiControlError::InvalidConfig(
                "monitor.shell must not be empty".into(),
            ));
        }
        if !(100..=60000).contains(&self.probe_timeout_ms) {
            return Err(PiControlError::InvalidConfig(
                "monitor.probe_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_shell() -> String {
    "/bin/sh".into()
}
fn default_probe_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemSection {
    /// argv, run without a shell.
    #[serde(default = "default_shutdown_command")]
    pub shutdown_command: Vec<String>,
}

impl Default for SystemSection {
    fn default() -> Self {
        Self {
            shutdown_command: default_shutdown_command(),
        }
    }
}

impl SystemSection {
    pub fn validate(&self) -> Result<()> {
        match self.shutdown_command.first() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err(PiControlError::InvalidConfig(
                "system.shutdown_command must name a program".into(),
            )),
        }
    }
}

fn default_shutdown_command() -> Vec<String> {
    vec!["sudo".into(), "shutdown".into(), "now".into()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackSection {
    #[serde(default = "default_player")]
    pub program: String,

    /// Passed before the URL.
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            program: default_player(),
            args: default_player_args(),
        }
    }
}

impl PlaybackSection {
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(PiControlError::InvalidConfig(
                "playback.program must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_player() -> String {
    "cvlc".into()
}
fn default_player_args() -> Vec<String> {
    vec!["--preferred-resolution".into(), "-1".into()]
}
