//! Trip record storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::error::TripError;
use super::model::{NewTripRecord, TripRecord};

/// Persistent store of trip records keyed by user.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Validate and store a record for `user_id`, returning the stored copy.
    async fn save(&self, user_id: &str, trip: NewTripRecord) -> Result<TripRecord, TripError>;

    /// All of a user's records, most recent travel date first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TripRecord>, TripError>;
}

/// Process-local trip store. Records are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTripStore {
    records: RwLock<HashMap<String, Vec<TripRecord>>>,
    next_id: AtomicU64,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn save(&self, user_id: &str, trip: NewTripRecord) -> Result<TripRecord, TripError> {
        let trip = trip.validate()?;

        let record = TripRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            user_id: user_id.to_string(),
            trip,
            created_at: Utc::now(),
        };

        let mut guard = self.records.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());

        debug!(user = user_id, id = record.id, "saved trip record");
        Ok(record)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TripRecord>, TripError> {
        let guard = self.records.read().await;
        let mut records = guard.get(user_id).cloned().unwrap_or_default();
        records.sort_by(|a, b| b.trip.travel_date.cmp(&a.trip.travel_date));
        Ok(records)
    }
}
