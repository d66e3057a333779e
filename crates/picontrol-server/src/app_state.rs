//! Shared application state for the picontrol server.
//!
//! Compiles the metric catalog once, builds the side-effect services and
//! registers every command handler with the dispatcher. Startup errors are
//! returned, not panicked on.

use std::sync::Arc;

use picontrol_core::error::Result;
use picontrol_core::probe::MetricCatalog;

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::monitor::{MonitorEngine, ProbeRunner, ShellRunner};
use crate::services::{
    MonitorService, PlayVideoService, Player, ServerInfoService, ShutdownService,
    StopVideoService, TestService, UnameService,
};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    dispatcher: Arc<Dispatcher>,
}

struct AppStateInner {
    cfg: ServerConfig,
    player: Arc<Player>,
}

impl AppState {
    /// Build application state with the shell-backed probe runner.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let runner = Arc::new(ShellRunner::from_config(&cfg.monitor));
        Self::with_runner(cfg, runner)
    }

    /// Build application state with a caller-provided probe runner.
    pub fn with_runner(cfg: ServerConfig, runner: Arc<dyn ProbeRunner>) -> Result<Self> {
        // 1) Compile the metric table (fails fast on a bad pattern/expression)
        let catalog = Arc::new(MetricCatalog::builtin()?);
        let engine = MonitorEngine::new(catalog, runner);

        // 2) Side-effect state
        let player = Arc::new(Player::new(&cfg.playback));

        // 3) Register command handlers
        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(ShutdownService::new(
            cfg.system.shutdown_command.clone(),
        )));
        dispatcher.register(Arc::new(TestService::new()));
        dispatcher.register(Arc::new(ServerInfoService::new()));
        dispatcher.register(Arc::new(UnameService::new()));
        dispatcher.register(Arc::new(MonitorService::new(engine)));
        dispatcher.register(Arc::new(PlayVideoService::new(Arc::clone(&player))));
        dispatcher.register(Arc::new(StopVideoService::new(Arc::clone(&player))));

        tracing::debug!(cmds = ?dispatcher.registered_cmds(), "command handlers registered");

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, player }),
            dispatcher: Arc::new(dispatcher),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn player(&self) -> Arc<Player> {
        Arc::clone(&self.inner.player)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
