//! Shared application state for the API server.

use postboard_db::Storage;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Each storage call checks its own connection out of the
/// pool, so handlers never share a session.
#[derive(Clone)]
pub struct AppState {
    /// The configured storage backend.
    pub storage: Storage,
}

impl AppState {
    /// Create application state over a storage backend.
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }
}
