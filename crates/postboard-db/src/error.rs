//! Error types for the data layer.
//!
//! Every storage failure is reported as a [`StoreError`] whose variant is
//! the failure *kind* callers branch on. Raw [`sqlx`] errors are classified
//! by `SQLSTATE` so the write path reports uniqueness and foreign-key
//! violations in the same shape regardless of backend.

use postboard_types::{EntityKind, FieldError};

/// `SQLSTATE` for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// `SQLSTATE` for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field was missing or empty. Raised before any storage call.
    #[error("validation error: {0}")]
    Validation(#[from] FieldError),

    /// A foreign key did not reference an existing row.
    #[error("referential integrity error: {field} {id} does not reference an existing {target}")]
    ReferentialIntegrity {
        /// Wire name of the foreign-key field.
        field: &'static str,
        /// The id that was submitted.
        id: i64,
        /// The kind of entity the field must reference.
        target: EntityKind,
    },

    /// A unique field collided with an existing row.
    #[error("uniqueness error: {field} `{value}` is already taken")]
    Uniqueness {
        /// Wire name of the unique field.
        field: &'static str,
        /// The colliding value.
        value: String,
    },

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The database rejected a statement for a reason not covered above.
    #[error("database error: {0}")]
    Database(String),

    /// Bootstrapping the schema failed.
    #[error("schema bootstrap error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unavailable(err.to_string()),
            sqlx::Error::Configuration(e) => Self::Config(e.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

/// A constraint violation reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Violation {
    /// A unique constraint, with its name when the server reported one.
    Unique(Option<String>),
    /// A foreign-key constraint, with its name when the server reported one.
    ForeignKey(Option<String>),
}

impl Violation {
    /// Classify a [`sqlx::Error`] as a constraint violation, if it is one.
    pub(crate) fn of(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };
        let constraint = db_err.constraint().map(ToOwned::to_owned);
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => Some(Self::Unique(constraint)),
            Some(FOREIGN_KEY_VIOLATION) => Some(Self::ForeignKey(constraint)),
            _ => None,
        }
    }
}
