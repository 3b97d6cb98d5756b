//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Storage never became reachable. Fatal: the process exits.
    #[error("startup failure: {source}")]
    Startup {
        /// The underlying readiness error.
        #[from]
        source: postboard_db::ReadinessError,
    },

    /// Schema bootstrap or seeding failed.
    #[error("storage error: {source}")]
    Store {
        /// The underlying storage error.
        #[from]
        source: postboard_db::StoreError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: postboard_api::ServerError,
    },
}
