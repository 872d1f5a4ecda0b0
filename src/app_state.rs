//! Shared application state injected into all Axum handlers.

use crate::persistence::MatchStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Match store for all database access.
    pub store: MatchStore,
}
