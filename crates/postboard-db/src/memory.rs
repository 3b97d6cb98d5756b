//! In-memory entity store with a primary and a lagging replica.
//!
//! Used by tests and by the server when no database is configured. The
//! store keeps two copies of every table: writes go to the primary, and
//! the replica only catches up when [`MemoryStore::sync_replica`] runs (or
//! after every write in [`ReplicationMode::Synchronous`]). This makes the
//! replica staleness window observable and deterministic.
//!
//! Constraint checks (e-mail uniqueness, foreign keys) run against the
//! primary under its write lock, so concurrent inserts with the same
//! e-mail serialize and exactly one wins. Ids come from per-table counters
//! that are only advanced once an insert has passed every check, and are
//! never decremented.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use postboard_types::{
    Comment, CommentId, EntityKind, NewComment, NewPost, NewUser, Post, PostId, User, UserId,
};

use crate::error::StoreError;
use crate::storage::ReadTarget;

/// How writes propagate from the primary to the replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicationMode {
    /// The replica is refreshed after every write.
    #[default]
    Synchronous,
    /// The replica only changes when [`MemoryStore::sync_replica`] is called.
    Manual,
}

/// One copy of all three tables plus the id counters.
#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    fn has_user(&self, id: UserId) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn has_post(&self, id: PostId) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }
}

/// Allocate the id after `last`, advancing the counter.
fn next_id(last: &mut i64, kind: EntityKind) -> Result<i64, StoreError> {
    let next = last
        .checked_add(1)
        .ok_or_else(|| StoreError::Database(format!("{kind} id space exhausted")))?;
    *last = next;
    Ok(next)
}

#[derive(Debug)]
struct Inner {
    primary: RwLock<Tables>,
    replica: RwLock<Tables>,
    mode: ReplicationMode,
    available: AtomicBool,
}

/// Shared handle to an in-memory primary/replica pair.
///
/// Cloning the handle shares the same tables.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(ReplicationMode::default())
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new(mode: ReplicationMode) -> Self {
        Self {
            inner: Arc::new(Inner {
                primary: RwLock::new(Tables::default()),
                replica: RwLock::new(Tables::default()),
                mode,
                available: AtomicBool::new(true),
            }),
        }
    }

    /// Simulate the backing store going away (or coming back).
    ///
    /// While unavailable every operation fails with
    /// [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Copy the primary's current contents to the replica.
    ///
    /// The primary read lock is held until the replica is replaced, so a
    /// copy taken before a later write can never land after it. Locks are
    /// always taken primary first, then replica.
    pub fn sync_replica(&self) {
        let primary = self.inner.primary.read();
        *self.inner.replica.write() = primary.clone();
        drop(primary);
        tracing::trace!("Memory replica synchronized");
    }

    /// Succeed if the store is reachable.
    pub fn ping(&self) -> Result<(), StoreError> {
        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(String::from("memory store is offline")))
        }
    }

    fn after_write(&self) {
        if self.inner.mode == ReplicationMode::Synchronous {
            self.sync_replica();
        }
    }

    fn tables(&self, target: ReadTarget) -> &RwLock<Tables> {
        match target {
            ReadTarget::Primary => &self.inner.primary,
            ReadTarget::Replica => &self.inner.replica,
        }
    }

    /// Insert a validated user.
    pub fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        self.ping()?;
        let created = {
            let mut tables = self.inner.primary.write();
            if tables.users.iter().any(|u| u.email == user.email) {
                return Err(StoreError::Uniqueness {
                    field: "email",
                    value: user.email.clone(),
                });
            }
            let id = next_id(&mut tables.last_user_id, EntityKind::User)?;
            let created = User {
                id: UserId(id),
                name: user.name.clone(),
                email: user.email.clone(),
            };
            tables.users.push(created.clone());
            created
        };
        self.after_write();
        Ok(created)
    }

    /// Insert a validated post.
    pub fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        self.ping()?;
        let created = {
            let mut tables = self.inner.primary.write();
            if !tables.has_user(post.user_id) {
                return Err(StoreError::ReferentialIntegrity {
                    field: "user_id",
                    id: post.user_id.into_inner(),
                    target: EntityKind::User,
                });
            }
            let id = next_id(&mut tables.last_post_id, EntityKind::Post)?;
            let created = Post {
                id: PostId(id),
                title: post.title.clone(),
                content: post.content.clone(),
                user_id: post.user_id,
            };
            tables.posts.push(created.clone());
            created
        };
        self.after_write();
        Ok(created)
    }

    /// Insert a validated comment.
    pub fn insert_comment(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        self.ping()?;
        let created = {
            let mut tables = self.inner.primary.write();
            if !tables.has_post(comment.post_id) {
                return Err(StoreError::ReferentialIntegrity {
                    field: "post_id",
                    id: comment.post_id.into_inner(),
                    target: EntityKind::Post,
                });
            }
            if !tables.has_user(comment.user_id) {
                return Err(StoreError::ReferentialIntegrity {
                    field: "user_id",
                    id: comment.user_id.into_inner(),
                    target: EntityKind::User,
                });
            }
            let id = next_id(&mut tables.last_comment_id, EntityKind::Comment)?;
            let created = Comment {
                id: CommentId(id),
                content: comment.content.clone(),
                post_id: comment.post_id,
                user_id: comment.user_id,
            };
            tables.comments.push(created.clone());
            created
        };
        self.after_write();
        Ok(created)
    }

    /// List users from the given target.
    pub fn list_users(&self, target: ReadTarget) -> Result<Vec<User>, StoreError> {
        self.ping()?;
        Ok(self.tables(target).read().users.clone())
    }

    /// List posts from the given target.
    pub fn list_posts(&self, target: ReadTarget) -> Result<Vec<Post>, StoreError> {
        self.ping()?;
        Ok(self.tables(target).read().posts.clone())
    }

    /// List comments from the given target.
    pub fn list_comments(&self, target: ReadTarget) -> Result<Vec<Comment>, StoreError> {
        self.ping()?;
        Ok(self.tables(target).read().comments.clone())
    }
}
