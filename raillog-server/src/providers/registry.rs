//! Parser for the unit registry provider.
//!
//! The registry is queried per train number, so its records carry no train
//! number to match; only the date is checked. Unit identifiers are raw
//! ("cr400af2018") and need canonicalizing afterwards.
//!
//! ```json
//! [ { "date": "2024-05-01", "emu_no": "CR400AF2018" } ]
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::TrainQuery;

use super::candidate::ProviderCandidate;
use super::date::parse_service_date;

/// One unit sighting reported by the registry.
#[derive(Debug, Deserialize)]
struct RegistryEntry {
    date: Option<String>,
    emu_no: Option<String>,
}

impl From<RegistryEntry> for ProviderCandidate {
    fn from(entry: RegistryEntry) -> Self {
        Self {
            service_date: entry.date.as_deref().and_then(parse_service_date),
            train_numbers: Vec::new(),
            raw_code: entry.emu_no,
        }
    }
}

/// Extract normalized unit identifiers for the query date.
///
/// Identifiers are trimmed and upper-cased but not yet canonicalized.
/// Anything other than a top-level array yields no identifiers.
pub fn parse_registry(body: &[u8], query: &TrainQuery) -> Vec<String> {
    let entries = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            debug!("registry response is not an array");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "registry response is not JSON");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RegistryEntry>(value).ok())
        .map(ProviderCandidate::from)
        .filter(|candidate| {
            let keep = candidate.date_matches(query);
            if !keep {
                trace!(?candidate, "registry entry is for another day");
            }
            keep
        })
        .filter_map(|candidate| candidate.code().map(str::to_uppercase))
        .collect()
}
