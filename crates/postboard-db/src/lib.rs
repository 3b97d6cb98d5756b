//! Data layer for the Postboard service.
//!
//! `PostgreSQL` holds users, posts and comments. Writes always go to the
//! primary; list queries go to a read replica that may lag behind it. An
//! in-memory backend with the same primary/replica split backs tests and
//! local runs without a database.
//!
//! # Architecture
//!
//! ```text
//! API handler
//!     |
//!     +-- create_* --> validate --> primary (UserStore / PostStore / CommentStore)
//!     |
//!     +-- list_*   --> ReadTarget::Replica (default) or ReadTarget::Primary
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` pool configuration and the primary/replica pair
//! - [`user_store`], [`post_store`], [`comment_store`] -- per-table SQL
//! - [`memory`] -- In-process tables with a manually synced replica
//! - [`storage`] -- Backend dispatch for the write and read paths
//! - [`readiness`] -- Bounded startup probe of both targets
//! - [`seed`] -- Random demo users, posts and comments
//! - [`error`] -- Shared error types

pub mod comment_store;
pub mod error;
pub mod memory;
pub mod post_store;
pub mod postgres;
pub mod readiness;
pub mod seed;
pub mod storage;
pub mod user_store;

// Re-export primary types for convenience.
pub use comment_store::{CommentRow, CommentStore};
pub use error::StoreError;
pub use memory::{MemoryStore, ReplicationMode};
pub use post_store::{PostRow, PostStore};
pub use postgres::{PostgresCluster, PostgresConfig, PostgresPool};
pub use readiness::{ReadinessError, ReadinessPolicy, wait_until_ready};
pub use seed::{SeedPlan, SeedReport, seed, seed_comments, seed_posts, seed_users};
pub use storage::{ReadTarget, Storage};
pub use user_store::{UserRow, UserStore};
