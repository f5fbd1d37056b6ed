//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `RAILLOG_BIND_ADDR` | `127.0.0.1:3000` |
//! | `RAILLOG_PRIMARY_URL` | unset (schedule provider disabled) |
//! | `RAILLOG_SECONDARY_URL` | `https://api.rail.re` |
//! | `RAILLOG_PROVIDER_TIMEOUT_SECS` | `10` |

use std::net::SocketAddr;

use tracing::{error, info};

use crate::providers::{ProviderDescriptor, ProviderKind};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default base URL of the unit registry provider.
const DEFAULT_SECONDARY_URL: &str = "https://api.rail.re";

/// Default per-provider timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest per-provider timeout accepted, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unusable
    #[error("invalid {key} value {value:?}: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Where the upstream providers live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Schedule provider base URL; skipped when `None`
    pub primary_url: Option<String>,
    /// Unit registry provider base URL
    pub secondary_url: String,
    /// Request timeout per provider, in seconds
    pub timeout_secs: u64,
}

impl ProviderSettings {
    /// Settings with only the registry provider at its default URL.
    pub fn new() -> Self {
        Self {
            primary_url: None,
            secondary_url: DEFAULT_SECONDARY_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the schedule provider URL.
    pub fn with_primary_url(mut self, url: impl Into<String>) -> Self {
        self.primary_url = Some(url.into());
        self
    }

    /// Set the registry provider URL.
    pub fn with_secondary_url(mut self, url: impl Into<String>) -> Self {
        self.secondary_url = url.into();
        self
    }

    /// Set the per-provider timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The provider chain in priority order: schedule first, registry second.
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        let mut descriptors = Vec::new();

        if let Some(url) = &self.primary_url {
            descriptors.push(
                ProviderDescriptor::new("schedule", url, ProviderKind::Schedule).with_priority(0),
            );
        }

        descriptors.push(
            ProviderDescriptor::new("registry", &self.secondary_url, ProviderKind::Registry)
                .with_priority(1),
        );

        descriptors
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub providers: ProviderSettings,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = var("RAILLOG_BIND_ADDR").unwrap_or_else(|| {
            info!("RAILLOG_BIND_ADDR not set, using default: {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });
        let bind_addr = bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "RAILLOG_BIND_ADDR",
                value: bind_addr.clone(),
                message: e.to_string(),
            })?;

        let mut providers = ProviderSettings::new();

        match var("RAILLOG_PRIMARY_URL") {
            Some(url) => providers = providers.with_primary_url(url),
            None => error!(
                "RAILLOG_PRIMARY_URL not set, schedule provider disabled; lookups use the registry only"
            ),
        }

        if let Some(url) = var("RAILLOG_SECONDARY_URL") {
            providers = providers.with_secondary_url(url);
        }

        if let Some(raw) = var("RAILLOG_PROVIDER_TIMEOUT_SECS") {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| (1..=MAX_TIMEOUT_SECS).contains(secs))
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "RAILLOG_PROVIDER_TIMEOUT_SECS",
                    value: raw.clone(),
                    message: format!("expected between 1 and {MAX_TIMEOUT_SECS} seconds"),
                })?;
            providers = providers.with_timeout(secs);
        }

        Ok(Self {
            bind_addr,
            providers,
        })
    }
}
