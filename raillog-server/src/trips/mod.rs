//! Trip records kept per user.
//!
//! A trip record is one journey a user took: which train, when, between
//! which stations, on which rolling stock and at what price. Storage sits
//! behind the `TripStore` trait; `InMemoryTripStore` is the bundled
//! implementation.

mod error;
mod model;
mod store;

pub use error::TripError;
pub use model::{NewTripRecord, TripRecord};
pub use store::{InMemoryTripStore, TripStore};
