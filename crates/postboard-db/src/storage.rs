//! Write and read paths over whichever backend is configured.
//!
//! [`Storage`] is the single entry point the API layer talks to. It
//! routes every write to the primary and every list to the requested
//! [`ReadTarget`], validating payloads before any storage call so a
//! rejected create never reaches the database.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible.

use postboard_types::{Comment, EntityKind, NewComment, NewPost, NewUser, Post, User};

use crate::comment_store::CommentStore;
use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::post_store::PostStore;
use crate::postgres::PostgresCluster;
use crate::user_store::UserStore;

/// Which storage target a list query is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadTarget {
    /// The write-authoritative primary. Always reflects completed writes.
    Primary,
    /// The read replica. May lag the primary.
    #[default]
    Replica,
}

/// The configured storage backend.
#[derive(Clone)]
pub enum Storage {
    /// `PostgreSQL` primary and replica.
    Postgres(PostgresCluster),
    /// In-process tables.
    Memory(MemoryStore),
}

impl Storage {
    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Probe both the primary and the replica.
    ///
    /// # Errors
    ///
    /// Returns the first failure, [`StoreError::Unavailable`] in practice.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(cluster) => {
                cluster.primary().ping().await?;
                cluster.replica().ping().await
            }
            Self::Memory(store) => store.ping(),
        }
    }

    // -----------------------------------------------------------------------
    // Write path
    // -----------------------------------------------------------------------

    /// Validate and insert a user on the primary.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let user = user.validated()?;
        let created = match self {
            Self::Postgres(cluster) => UserStore::new(cluster.primary().pool()).insert(&user).await?,
            Self::Memory(store) => store.insert_user(&user)?,
        };
        tracing::info!(kind = %EntityKind::User, id = %created.id, "Entity created");
        Ok(created)
    }

    /// Validate and insert a post on the primary.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        let post = post.validated()?;
        let created = match self {
            Self::Postgres(cluster) => PostStore::new(cluster.primary().pool()).insert(&post).await?,
            Self::Memory(store) => store.insert_post(&post)?,
        };
        tracing::info!(kind = %EntityKind::Post, id = %created.id, "Entity created");
        Ok(created)
    }

    /// Validate and insert a comment on the primary.
    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let comment = comment.validated()?;
        let created = match self {
            Self::Postgres(cluster) => {
                CommentStore::new(cluster.primary().pool())
                    .insert(&comment)
                    .await?
            }
            Self::Memory(store) => store.insert_comment(&comment)?,
        };
        tracing::info!(kind = %EntityKind::Comment, id = %created.id, "Entity created");
        Ok(created)
    }

    // -----------------------------------------------------------------------
    // Read path
    // -----------------------------------------------------------------------

    /// List all users from `target`.
    pub async fn list_users(&self, target: ReadTarget) -> Result<Vec<User>, StoreError> {
        match self {
            Self::Postgres(cluster) => UserStore::new(pool_for(cluster, target)).list().await,
            Self::Memory(store) => store.list_users(target),
        }
    }

    /// List all posts from `target`.
    pub async fn list_posts(&self, target: ReadTarget) -> Result<Vec<Post>, StoreError> {
        match self {
            Self::Postgres(cluster) => PostStore::new(pool_for(cluster, target)).list().await,
            Self::Memory(store) => store.list_posts(target),
        }
    }

    /// List all comments from `target`.
    pub async fn list_comments(&self, target: ReadTarget) -> Result<Vec<Comment>, StoreError> {
        match self {
            Self::Postgres(cluster) => CommentStore::new(pool_for(cluster, target)).list().await,
            Self::Memory(store) => store.list_comments(target),
        }
    }
}

const fn pool_for(cluster: &PostgresCluster, target: ReadTarget) -> &sqlx::PgPool {
    match target {
        ReadTarget::Primary => cluster.primary().pool(),
        ReadTarget::Replica => cluster.replica().pool(),
    }
}
