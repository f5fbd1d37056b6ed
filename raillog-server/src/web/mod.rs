//! Web layer for the trip log.
//!
//! Provides the rolling-stock lookup and trip record endpoints.

mod auth;
mod dto;
mod routes;
mod state;

pub use auth::{AuthenticatedUser, USER_ID_HEADER};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
