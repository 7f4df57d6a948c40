//! Configuration for role-probe
//!
//! Settings come from CLI flags and environment variables (see `cli`); there
//! is no configuration file. `validate()` runs before any request is sent.

use crate::error::{ProbeError, ProbeResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";
pub const DEFAULT_MODEL: &str = "gemma3:1b";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Upper bound for the per-request timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Path appended to the base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Root configuration structure
///
/// Read-only once built; passed by reference into the client and runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    base_url: String,
    model: String,
    timeout_seconds: u64,
    log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Build and validate a configuration
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
        log_level: impl Into<String>,
    ) -> ProbeResult<Self> {
        let config = Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout_seconds,
            log_level: log_level.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Get the server base URL (e.g. `http://localhost:10000`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Full chat-completion URL derived from the base URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> ProbeResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ProbeError::Config(format!(
                "base_url '{}' must start with 'http://' or 'https://'",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ProbeError::Config("model cannot be empty".to_string()));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ProbeError::Config(format!(
                "timeout_seconds must be between 1 and {} (got {})",
                MAX_TIMEOUT_SECONDS, self.timeout_seconds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = ProbeConfig::default();
        assert_eq!(config.base_url(), "http://localhost:10000");
        assert_eq!(config.model(), "gemma3:1b");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.log_level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_derivation() {
        assert_eq!(
            ProbeConfig::default().endpoint(),
            "http://localhost:10000/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = ProbeConfig::new("http://host:8080/", "m", 10, "info").unwrap();
        assert_eq!(config.endpoint(), "http://host:8080/v1/chat/completions");
    }

    #[test]
    fn test_missing_protocol_base_url_fails() {
        let err = ProbeConfig::new("localhost:10000", "m", 10, "info").unwrap_err();
        assert!(matches!(err, ProbeError::Config(_)));
        assert!(err.to_string().contains("must start with 'http://'"));
    }

    #[test]
    fn test_blank_model_fails() {
        let err = ProbeConfig::new("http://h", "   ", 10, "info").unwrap_err();
        assert!(err.to_string().contains("model cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_fails() {
        assert!(ProbeConfig::new("http://h", "m", 0, "info").is_err());
    }

    #[test]
    fn test_excessive_timeout_fails() {
        assert!(ProbeConfig::new("http://h", "m", 301, "info").is_err());
    }

    #[test]
    fn test_boundary_timeouts_succeed() {
        assert!(ProbeConfig::new("https://h", "m", 1, "info").is_ok());
        assert!(ProbeConfig::new("https://h", "m", 300, "info").is_ok());
    }
}
