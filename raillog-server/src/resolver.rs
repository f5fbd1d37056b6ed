//! Rolling-stock resolution across providers.
//!
//! Providers are asked one at a time in ascending priority order. The first
//! provider that yields at least one unit code wins and later providers are
//! never contacted. Transport failures and empty answers fall through to the
//! next provider. A non-success status is only reported when it comes from
//! the last provider in the chain; otherwise an exhausted chain is an empty,
//! successful result.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::canonical::ModelCanonicalizer;
use crate::domain::{DomainError, RollingStock, TrainQuery};
use crate::providers::ProviderSource;

/// Default upper bound on one provider attempt.
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced to the caller of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The query itself was invalid; no provider was contacted
    #[error("invalid query: {0}")]
    InvalidInput(#[from] DomainError),

    /// The last provider in the chain answered with a non-success status
    #[error("provider {provider} returned status {status}")]
    Upstream { provider: String, status: u16 },
}

/// What one provider attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// The provider answered; these codes matched the query (possibly none).
    Candidates(Vec<String>),
    /// The provider could not be reached.
    Unavailable,
    /// The provider answered with a non-success status.
    Rejected { status: u16 },
}

/// Resolves train numbers to rolling stock using an ordered provider chain.
///
/// Holds no per-lookup state, so one resolver serves concurrent requests.
pub struct Resolver {
    /// Sources sorted by ascending priority.
    sources: Vec<Arc<dyn ProviderSource>>,
    canonicalizer: ModelCanonicalizer,
    attempt_timeout: Duration,
}

impl Resolver {
    /// Create a resolver over `sources`.
    ///
    /// Sources are ordered by their descriptor priority; sources with equal
    /// priority keep the order given.
    pub fn new(
        mut sources: Vec<Arc<dyn ProviderSource>>,
        canonicalizer: ModelCanonicalizer,
    ) -> Self {
        sources.sort_by_key(|s| s.descriptor().priority);
        Self {
            sources,
            canonicalizer,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Set the upper bound on a single provider attempt.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Provider names in the order they are tried.
    pub fn provider_names(&self) -> Vec<&str> {
        self.sources
            .iter()
            .map(|s| s.descriptor().name.as_str())
            .collect()
    }

    /// Resolve a raw train number and date.
    ///
    /// A blank train number fails with `ResolveError::InvalidInput` before
    /// any provider is contacted.
    pub async fn resolve(
        &self,
        train_number: &str,
        date: NaiveDate,
    ) -> Result<RollingStock, ResolveError> {
        let query = TrainQuery::new(train_number, date)?;
        self.resolve_query(&query).await
    }

    /// Resolve an already validated query.
    pub async fn resolve_query(&self, query: &TrainQuery) -> Result<RollingStock, ResolveError> {
        let last = self.sources.len().saturating_sub(1);

        for (idx, source) in self.sources.iter().enumerate() {
            let name = &source.descriptor().name;

            match self.attempt(source.as_ref(), query).await {
                ProviderOutcome::Candidates(codes) => {
                    let stock: RollingStock = codes.into_iter().collect();
                    if !stock.is_empty() {
                        info!(
                            provider = %name,
                            train = %query.train_number,
                            date = %query.date,
                            rolling_stock = %stock,
                            "resolved rolling stock"
                        );
                        return Ok(stock);
                    }
                    debug!(provider = %name, "no matching records");
                }
                ProviderOutcome::Unavailable => {}
                ProviderOutcome::Rejected { status } if idx == last => {
                    return Err(ResolveError::Upstream {
                        provider: name.clone(),
                        status,
                    });
                }
                ProviderOutcome::Rejected { .. } => {}
            }
        }

        debug!(
            train = %query.train_number,
            date = %query.date,
            "no provider resolved rolling stock"
        );
        Ok(RollingStock::new())
    }

    /// Ask one provider, folding every failure into a `ProviderOutcome`.
    pub async fn attempt(
        &self,
        source: &dyn ProviderSource,
        query: &TrainQuery,
    ) -> ProviderOutcome {
        let descriptor = source.descriptor();
        debug!(provider = %descriptor.name, train = %query.train_number, "querying provider");

        let fetched = tokio::time::timeout(self.attempt_timeout, source.fetch(query)).await;

        match fetched {
            Ok(Ok(body)) => {
                let codes = descriptor.kind.parse(&body, query, &self.canonicalizer);
                ProviderOutcome::Candidates(codes)
            }
            Ok(Err(e)) => match e.status() {
                Some(status) => {
                    warn!(provider = %descriptor.name, status, error = %e, "provider returned error status");
                    ProviderOutcome::Rejected { status }
                }
                None => {
                    warn!(provider = %descriptor.name, error = %e, "provider unavailable");
                    ProviderOutcome::Unavailable
                }
            },
            Err(_) => {
                warn!(
                    provider = %descriptor.name,
                    timeout_ms = self.attempt_timeout.as_millis() as u64,
                    "provider timed out"
                );
                ProviderOutcome::Unavailable
            }
        }
    }
}
