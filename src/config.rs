//! Command-line and environment configuration.

use crate::error::RelayError;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Default log filter when neither `--log-filter` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "text_relay=info";

/// Runtime configuration for the relay.
#[derive(Parser, Debug, Clone)]
#[command(name = "text-relay", about = "Relay text pushed over HTTP to live viewers")]
pub struct RelayConfig {
    /// Address the HTTP server listens on
    #[arg(long, default_value = DEFAULT_BIND, env = "TEXT_RELAY_BIND")]
    pub bind: SocketAddr,

    /// Seconds between keep-alive comments on the event stream
    #[arg(long, default_value_t = 15, env = "TEXT_RELAY_KEEP_ALIVE")]
    pub keep_alive_secs: u64,

    /// Show received text in this terminal
    #[arg(long, default_value_t = false, env = "TEXT_RELAY_VIEWER")]
    pub viewer: bool,

    /// Viewer refresh interval in milliseconds
    #[arg(long, default_value_t = 100, env = "TEXT_RELAY_REFRESH_MS")]
    pub refresh_ms: u64,

    /// Tracing filter directive (falls back to RUST_LOG)
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            keep_alive_secs: 15,
            viewer: false,
            refresh_ms: 100,
            log_filter: None,
        }
    }
}

impl RelayConfig {
    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.keep_alive_secs == 0 {
            return Err(RelayError::InvalidConfig(
                "keep-alive interval must be at least one second".to_string(),
            ));
        }
        if self.refresh_ms == 0 {
            return Err(RelayError::InvalidConfig(
                "viewer refresh interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RelayConfig::default();
        assert_eq!(config.bind.port(), 5000);
        assert_eq!(config.keep_alive(), Duration::from_secs(15));
        assert_eq!(config.refresh_interval(), Duration::from_millis(100));
        assert!(!config.viewer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let config = RelayConfig::try_parse_from([
            "text-relay",
            "--bind",
            "127.0.0.1:8080",
            "--viewer",
            "--refresh-ms",
            "250",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert!(config.viewer);
        assert_eq!(config.refresh_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_validate_rejects_zero_intervals() {
        let config = RelayConfig {
            refresh_ms: 0,
            ..RelayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RelayError::InvalidConfig(_))
        ));

        let config = RelayConfig {
            keep_alive_secs: 0,
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
