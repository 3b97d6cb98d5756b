//! REST API server for the Postboard service.
//!
//! This crate provides an Axum HTTP server that exposes create and list
//! endpoints for users, posts and comments:
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/users/` | `{name, email}` | `{id, name, email}` |
//! | `GET` | `/users/` | -- | `[{id, name, email}, ...]` |
//! | `POST` | `/posts/` | `{title, content, user_id}` | `{id, title, content, user_id}` |
//! | `GET` | `/posts/` | -- | `[{id, title, content, user_id}, ...]` |
//! | `POST` | `/comments/` | `{content, post_id, user_id}` | `{id, content, post_id, user_id}` |
//! | `GET` | `/comments/` | -- | `[{id, content, post_id, user_id}, ...]` |
//!
//! # Consistency
//!
//! Creates always land on the primary. Lists are served from the read
//! replica and may not yet include a create that just returned; pass
//! `?consistency=strong` to read from the primary instead.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
