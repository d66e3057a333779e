//! Shared error type across picontrol crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// No handler registered for `cmd`.
    UnknownCommand,
    /// Monitor category absent from the metric table.
    UnknownCategory,
    /// Probe command could not run or exited non-zero.
    ProbeFailed,
    /// Probe command exceeded its time budget.
    ProbeTimeout,
    /// Extraction pattern did not match the probe output.
    NoMatch,
    /// Post-processing expression rejected or failed to evaluate.
    BadExpression,
    /// Configuration rejected at load time.
    InvalidConfig,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnknownCommand => "UNKNOWN_COMMAND",
            ClientCode::UnknownCategory => "UNKNOWN_CATEGORY",
            ClientCode::ProbeFailed => "PROBE_FAILED",
            ClientCode::ProbeTimeout => "PROBE_TIMEOUT",
            ClientCode::NoMatch => "NO_MATCH",
            ClientCode::BadExpression => "BAD_EXPRESSION",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PiControlError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PiControlError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("probe failed: {0}")]
    ProbeFailed(String),
    #[error("probe timed out after {0} ms")]
    ProbeTimeout(u64),
    #[error("pattern did not match: {0}")]
    NoMatch(String),
    #[error("bad expression: {0}")]
    BadExpression(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PiControlError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PiControlError::BadRequest(_) => ClientCode::BadRequest,
            PiControlError::UnknownCommand(_) => ClientCode::UnknownCommand,
            PiControlError::UnknownCategory(_) => ClientCode::UnknownCategory,
            PiControlError::ProbeFailed(_) => ClientCode::ProbeFailed,
            PiControlError::ProbeTimeout(_) => ClientCode::ProbeTimeout,
            PiControlError::NoMatch(_) => ClientCode::NoMatch,
            PiControlError::BadExpression(_) => ClientCode::BadExpression,
            PiControlError::InvalidConfig(_) => ClientCode::InvalidConfig,
            PiControlError::Internal(_) => ClientCode::Internal,
        }
    }
}
