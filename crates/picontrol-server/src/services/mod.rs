//! Built-in command handlers.

pub mod monitor;
pub mod playback;
pub mod system;

pub use monitor::MonitorService;
pub use playback::{PlayVideoService, Player, StopOutcome, StopVideoService};
pub use system::{ServerInfoService, ShutdownService, TestService, UnameService};
