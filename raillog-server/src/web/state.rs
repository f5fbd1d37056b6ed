//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::Resolver;
use crate::trips::TripStore;

/// Shared application state.
///
/// Everything here is read-only after startup or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    /// Rolling-stock resolver over the configured providers
    pub resolver: Arc<Resolver>,

    /// Trip record store
    pub trips: Arc<dyn TripStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: Resolver, trips: impl TripStore + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
            trips: Arc::new(trips),
        }
    }
}
