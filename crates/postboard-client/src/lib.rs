//! Presentation client for the Postboard REST API.
//!
//! The client lists users, posts and comments as text tables and creates
//! new ones from form input. Dependent entities are created by picking
//! the referenced user by name and post by title; those labels are
//! resolved to ids locally against a freshly refreshed [`Snapshot`]
//! before anything is sent.
//!
//! # Modules
//!
//! - [`client`] -- HTTP calls against the REST API
//! - [`error`] -- Client failure taxonomy
//! - [`forms`] -- Create forms with local validation and label resolution
//! - [`labels`] -- Label/id mapping and the duplicate-label policy
//! - [`render`] -- Plain-text tables
//! - [`snapshot`] -- Explicitly refreshed copy of all three collections

pub mod client;
pub mod error;
pub mod forms;
pub mod labels;
pub mod render;
pub mod snapshot;

pub use client::{ApiClient, Consistency, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use forms::{CommentForm, PostForm, UserForm};
pub use labels::{LabelMap, TieBreak};
pub use snapshot::Snapshot;
