//! Parser for the schedule provider.
//!
//! The schedule provider reports, per run, the train numbers it covered and
//! the formation already in display form:
//!
//! ```json
//! { "data": [ { "runDate": "2024-05-01", "trainNum": "G1/G3", "trainCode": "CRH380A + CRH380A" } ] }
//! ```
//!
//! Coupled formations are joined with `" + "`, which becomes a single space.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::TrainQuery;

use super::candidate::{ProviderCandidate, split_train_numbers};
use super::date::parse_service_date;

/// Separator the provider uses between coupled units.
const COUPLING_SEPARATOR: &str = " + ";

/// One run reported by the provider.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleEntry {
    run_date: Option<String>,
    train_num: Option<String>,
    train_code: Option<String>,
}

impl From<ScheduleEntry> for ProviderCandidate {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            service_date: entry.run_date.as_deref().and_then(parse_service_date),
            train_numbers: entry
                .train_num
                .as_deref()
                .map(split_train_numbers)
                .unwrap_or_default(),
            raw_code: entry.train_code,
        }
    }
}

/// Extract the formations matching `query` from a schedule response body.
///
/// Anything other than an object carrying a `data` list yields no codes.
pub fn parse_schedule(body: &[u8], query: &TrainQuery) -> Vec<String> {
    // Entries stay raw JSON so one malformed entry does not discard the rest.
    let entries = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut response)) => match response.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => {
                debug!("schedule response has no data list");
                return Vec::new();
            }
        },
        Ok(_) => {
            debug!("schedule response is not an object");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "schedule response is not JSON");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|value| serde_json::from_value::<ScheduleEntry>(value).ok())
        .map(ProviderCandidate::from)
        .filter(|candidate| {
            let keep = candidate.matches(query);
            if !keep {
                trace!(?candidate, "schedule entry does not match query");
            }
            keep
        })
        .filter_map(|candidate| {
            let code = candidate.code()?;
            Some(code.replace(COUPLING_SEPARATOR, " ").trim().to_string())
        })
        .collect()
}
