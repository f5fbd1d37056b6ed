//! Static description of each upstream provider.

use reqwest::Url;

use crate::canonical::ModelCanonicalizer;
use crate::domain::TrainQuery;

use super::error::FetchError;
use super::registry::parse_registry;
use super::schedule::parse_schedule;

/// The response dialects we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Per-run schedule with display-ready formations; filtered in body.
    Schedule,
    /// Per-train unit registry with raw identifiers; train number in the path.
    Registry,
}

impl ProviderKind {
    /// Whether the provider already reports codes in display form.
    pub fn already_canonical(self) -> bool {
        match self {
            ProviderKind::Schedule => true,
            ProviderKind::Registry => false,
        }
    }

    /// Parse a response body into display-ready unit codes for `query`.
    pub fn parse(
        self,
        body: &[u8],
        query: &TrainQuery,
        canonicalizer: &ModelCanonicalizer,
    ) -> Vec<String> {
        let codes = match self {
            ProviderKind::Schedule => parse_schedule(body, query),
            ProviderKind::Registry => parse_registry(body, query),
        };

        if self.already_canonical() {
            return codes;
        }

        codes
            .iter()
            .map(|code| canonicalizer.canonicalize_unit(code))
            .collect()
    }

    /// Build the request URL for `query` against `base_url`.
    ///
    /// - Schedule: `{base}/trains?trainNum=G1&runDate=2024-05-01`
    /// - Registry: `{base}/train/G1`
    pub fn request_url(self, base_url: &str, query: &TrainQuery) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(format!("{base_url}: not a base URL")))?;
            segments.pop_if_empty();
            match self {
                ProviderKind::Schedule => {
                    segments.push("trains");
                }
                ProviderKind::Registry => {
                    segments.push("train").push(query.train_number.as_str());
                }
            }
        }

        if self == ProviderKind::Schedule {
            url.query_pairs_mut()
                .append_pair("trainNum", query.train_number.as_str())
                .append_pair("runDate", &query.date.format("%Y-%m-%d").to_string());
        }

        Ok(url)
    }
}

/// One upstream provider: where it lives, how it talks, when to ask it.
///
/// Lower `priority` values are tried first.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Name used in logs and upstream errors
    pub name: String,
    /// Base URL of the provider API
    pub base_url: String,
    /// Position in the fallback chain (ascending)
    pub priority: u32,
    /// Response dialect
    pub kind: ProviderKind,
}

impl ProviderDescriptor {
    /// Create a descriptor with priority 0.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            priority: 0,
            kind,
        }
    }

    /// Set the fallback priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Request URL for `query`.
    pub fn request_url(&self, query: &TrainQuery) -> Result<Url, FetchError> {
        self.kind.request_url(&self.base_url, query)
    }
}
