//! Command-line interface for role-probe
//!
//! Every flag has a default, so running with no arguments executes the full
//! battery against a local server.

use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_LOG_LEVEL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS, ProbeConfig,
};
use crate::error::ProbeResult;
use clap::{Parser, Subcommand};

/// Probe how a chat-completion server handles role orderings
#[derive(Parser, Debug)]
#[command(name = "role-probe")]
#[command(version)]
#[command(about = "Probe how a chat-completion server handles role orderings")]
#[command(
    long_about = "Sends a fixed battery of system/user/assistant conversations to an \
    OpenAI-compatible /v1/chat/completions endpoint, one at a time, and prints each \
    response or error. Individual failures never abort the run."
)]
pub struct Cli {
    /// Server base URL (the chat-completion path is appended)
    #[arg(long, env = "ROLE_PROBE_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Model identifier sent with every request
    #[arg(long, env = "ROLE_PROBE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "ROLE_PROBE_TIMEOUT_SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECONDS,
        global = true
    )]
    pub timeout_seconds: u64,

    /// Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
    #[arg(long, env = "ROLE_PROBE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL, global = true)]
    pub log_level: String,

    /// Only run these cases (1-based, repeatable)
    #[arg(long = "case", value_name = "N")]
    pub cases: Vec<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the conversation battery without sending anything
    List,
}

impl Cli {
    /// Build validated configuration from the parsed flags
    pub fn to_config(&self) -> ProbeResult<ProbeConfig> {
        ProbeConfig::new(
            self.base_url.clone(),
            self.model.clone(),
            self.timeout_seconds,
            self.log_level.clone(),
        )
    }
}
