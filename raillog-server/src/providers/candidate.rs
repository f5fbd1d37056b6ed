//! Provider candidates and matching against a query.

use chrono::NaiveDate;

use crate::domain::TrainQuery;

/// One record reported by an upstream provider, before matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCandidate {
    /// Service date, if the provider's value could be parsed.
    pub service_date: Option<NaiveDate>,
    /// Train numbers this record covers (several for coupled services).
    pub train_numbers: Vec<String>,
    /// Model or unit code, as reported.
    pub raw_code: Option<String>,
}

impl ProviderCandidate {
    /// Whether the candidate ran on exactly the query date.
    ///
    /// Candidates with an unknown date never match.
    pub fn date_matches(&self, query: &TrainQuery) -> bool {
        self.service_date == Some(query.date)
    }

    /// Whether any reported train number equals the query's, ignoring case.
    pub fn train_number_matches(&self, query: &TrainQuery) -> bool {
        self.train_numbers
            .iter()
            .any(|n| query.train_number.matches(n))
    }

    /// Full match: same day and one of the train numbers.
    pub fn matches(&self, query: &TrainQuery) -> bool {
        self.date_matches(query) && self.train_number_matches(query)
    }

    /// The code, trimmed, if it is not blank.
    pub fn code(&self) -> Option<&str> {
        self.raw_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Split a "/"-delimited train number field ("G1/G3") into its parts.
///
/// Parts are trimmed and upper-cased; empty parts are dropped.
pub fn split_train_numbers(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(|part| part.trim().to_uppercase())
        .filter(|part| !part.is_empty())
        .collect()
}
