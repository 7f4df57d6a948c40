//! role-probe - chat-completion role ordering probe
//!
//! Sends fixed system/user/assistant conversations to an OpenAI-compatible
//! chat-completion endpoint and reports how the server responds to each.

pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod report;
pub mod runner;
pub mod telemetry;
