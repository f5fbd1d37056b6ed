//! Domain types for rolling-stock lookup and trip logging.
//!
//! Types here enforce their invariants at construction time, so code that
//! receives a `TrainNumber` or `TrainQuery` can trust it is normalized.

mod error;
mod query;
mod rolling_stock;
mod train_number;

pub use error::DomainError;
pub use query::TrainQuery;
pub use rolling_stock::RollingStock;
pub use train_number::TrainNumber;
