//! Server configuration.

use std::net::SocketAddr;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "PLAN_SERVER_ADDR";

/// Environment variable holding the largest allowed plan set.
pub const MAX_PLAN_SET_VAR: &str = "PLAN_MAX_PLAN_SET";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held an unusable value
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the plan server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Maximum number of requests one plan set may resolve to.
    /// Larger sets are rejected before any request is built.
    pub max_plan_set_size: usize,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(bind_addr: SocketAddr, max_plan_set_size: usize) -> Self {
        Self {
            bind_addr,
            max_plan_set_size,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_VAR) {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup(MAX_PLAN_SET_VAR) {
            config.max_plan_set_size = match value.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: MAX_PLAN_SET_VAR,
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Ok(size) => size,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: MAX_PLAN_SET_VAR,
                        value,
                        reason: e.to_string(),
                    });
                }
            };
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_plan_set_size: 16,
        }
    }
}
