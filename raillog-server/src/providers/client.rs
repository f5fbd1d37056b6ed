//! HTTP client for upstream providers.
//!
//! Each provider gets its own pooled `reqwest::Client`, shared by every
//! concurrent lookup, with an explicit request timeout so a slow provider
//! cannot stall the fallback chain.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::TrainQuery;

use super::descriptor::ProviderDescriptor;
use super::error::FetchError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of error body characters kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 500;

/// Something that can fetch a provider's raw response for a query.
///
/// The resolver only sees this trait, which keeps it testable without a
/// network.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    /// The provider this source talks to.
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Fetch the raw response body for `query`.
    ///
    /// Non-success statuses are returned as `FetchError::Api`.
    async fn fetch(&self, query: &TrainQuery) -> Result<Vec<u8>, FetchError>;
}

/// Configuration for a provider client.
#[derive(Debug, Clone)]
pub struct ProviderClientConfig {
    /// Provider to talk to
    pub descriptor: ProviderDescriptor,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderClientConfig {
    /// Create a config with the default timeout.
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self {
            descriptor,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// `reqwest`-backed provider source.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    descriptor: ProviderDescriptor,
}

impl ProviderClient {
    /// Create a client for the configured provider.
    pub fn new(config: ProviderClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            descriptor: config.descriptor,
        })
    }
}

#[async_trait]
impl ProviderSource for ProviderClient {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn fetch(&self, query: &TrainQuery) -> Result<Vec<u8>, FetchError> {
        let url = self.descriptor.request_url(query)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
