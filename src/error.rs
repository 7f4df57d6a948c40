//! Error types for role-probe
//!
//! Two tiers: transport-level failures (connection, timeout, non-2xx status)
//! and a generic fallback for everything else. Apart from `Config`, every
//! error is reported and the run moves on to the next conversation.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("request failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("request timed out after {timeout_seconds} seconds")]
    Timeout {
        endpoint: String,
        timeout_seconds: u64,
    },

    #[error("server returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl ProbeError {
    /// Whether this error belongs to the transport/HTTP tier
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}

/// Convenience type alias for Results
pub type ProbeResult<T> = Result<T, ProbeError>;
