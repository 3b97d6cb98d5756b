//! Shared type definitions for the Postboard service.
//!
//! This crate is the single source of truth for the records exchanged
//! between the REST API, the storage layer, and the presentation client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for store-assigned identifiers
//! - [`records`] -- Persisted records and create payloads for each entity
//! - [`validate`] -- Non-empty field validation applied before storage

pub mod ids;
pub mod records;
pub mod validate;

// Re-export all public types at crate root for convenience.
pub use ids::{CommentId, PostId, UserId};
pub use records::{Comment, EntityKind, NewComment, NewPost, NewUser, Post, User};
pub use validate::FieldError;
