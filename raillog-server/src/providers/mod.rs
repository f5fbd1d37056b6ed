//! Upstream rolling-stock providers.
//!
//! Each provider speaks its own JSON dialect. This module turns a provider
//! response into display-ready unit codes for one query:
//!
//! - `schedule`: runs with train numbers and ready-made formations
//! - `registry`: unit sightings per train with raw identifiers
//!
//! Malformed bodies and entries are never errors here; they simply
//! contribute no codes.

mod candidate;
mod client;
mod date;
mod descriptor;
mod error;
mod registry;
mod schedule;

pub use candidate::{ProviderCandidate, split_train_numbers};
pub use client::{ProviderClient, ProviderClientConfig, ProviderSource};
pub use date::parse_service_date;
pub use descriptor::{ProviderDescriptor, ProviderKind};
pub use error::FetchError;
pub use registry::parse_registry;
pub use schedule::parse_schedule;
