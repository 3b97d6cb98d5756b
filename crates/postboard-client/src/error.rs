//! Error types for the presentation client.
//!
//! Every failure aborts the action in progress; nothing is retried. The
//! CLI turns each variant into a one-line message for the user.

use postboard_types::{EntityKind, FieldError};

/// Errors that can occur in the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A form field was empty. Raised before any request is sent.
    #[error("input error: {0}")]
    Validation(#[from] FieldError),

    /// A selected label is not in the current snapshot.
    #[error("selected {kind} `{label}` does not exist")]
    UnknownReference {
        /// Which kind of entity the label should name.
        kind: EntityKind,
        /// The label as entered.
        label: String,
    },

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Failure kind reported by the server, when present.
        kind: Option<String>,
        /// Human-readable message.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Failure kind as reported by the server, if this is an API error.
    pub fn api_kind(&self) -> Option<&str> {
        match self {
            Self::Api { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }
}
