//! Configuration loading and management
//!
//! Configuration is read from YAML and can be overridden from the
//! environment:
//!
//! | Variable              | Overrides               |
//! |-----------------------|-------------------------|
//! | `RENTAL_CONFIG`       | path of the YAML file   |
//! | `RENTAL_BIND`         | `server.bind`           |
//! | `RENTAL_ACTOR_POLICY` | `actor.policy`          |
//! | `RENTAL_DEFAULT_SORT` | `listing.default_sort`  |
//!
//! # Example
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:8080
//! actor:
//!   policy: first_employee
//! listing:
//!   default_sort: -start_date
//! seed:
//!   employees:
//!     - name: Carla
//! ```

use crate::core::actor::ActorPolicy;
use crate::core::error::{ConfigError, RentalResult};
use crate::core::query::SortSpec;
use crate::storage::SeedData;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "RENTAL_CONFIG";
pub const BIND_VAR: &str = "RENTAL_BIND";
pub const ACTOR_POLICY_VAR: &str = "RENTAL_ACTOR_POLICY";
pub const DEFAULT_SORT_VAR: &str = "RENTAL_DEFAULT_SORT";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,

    /// Buffered events per subscriber before it starts lagging
    pub event_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            event_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub policy: ActorPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Sort applied when a listing request names none
    pub default_sort: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: "start_date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalConfig {
    pub server: ServerConfig,
    pub actor: ActorConfig,
    pub listing: ListingConfig,
    pub log: LogConfig,

    /// Records loaded into the store at startup
    pub seed: SeedData,
}

impl RentalConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RentalResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::IoError {
                message: format!("{}: {}", display, e),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(display),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RentalResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides read through `lookup` (usually the process environment)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> RentalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_VAR) {
            self.server.bind = bind;
        }

        if let Some(raw) = lookup(ACTOR_POLICY_VAR) {
            self.actor.policy =
                ActorPolicy::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    field: ACTOR_POLICY_VAR.to_string(),
                    value: raw.clone(),
                    message: "expected 'header' or 'first_employee'".to_string(),
                })?;
        }

        if let Some(sort) = lookup(DEFAULT_SORT_VAR) {
            self.listing.default_sort = sort;
        }

        Ok(self)
    }

    /// Load from `RENTAL_CONFIG` (or defaults), apply environment overrides and validate
    pub fn load() -> RentalResult<Self> {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let config = match env(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        let config = config.with_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> RentalResult<()> {
        self.bind_addr()?;
        self.default_sort()?;

        if self.server.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.event_capacity".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> RentalResult<SocketAddr> {
        self.server.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Parsed `listing.default_sort`
    pub fn default_sort(&self) -> RentalResult<SortSpec> {
        self.listing.default_sort.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "listing.default_sort".to_string(),
                value: self.listing.default_sort.clone(),
                message: "not a known sort key".to_string(),
            }
            .into()
        })
    }
}
