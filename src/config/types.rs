use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Component host settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Flush passes allowed before the update queue is reported as
    /// unsettled (default: 16).
    #[serde(default = "default_max_flush_passes")]
    pub max_flush_passes: u32,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Include the event target in output (default: true).
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_max_flush_passes() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_with_target() -> bool {
    true
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_flush_passes: default_max_flush_passes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: default_with_target(),
        }
    }
}
