//! Persisted records and create payloads.
//!
//! Each entity has two shapes: the `New*` payload a client submits to the
//! write path, and the persisted record (with its store-assigned id) that
//! both the write and read paths return. Relations are plain id foreign
//! keys; there is no object graph.

use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};
use crate::validate::{FieldError, require};

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The three entity kinds managed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A registered user.
    User,
    /// A post authored by a user.
    Post,
    /// A comment by a user on a post.
    Comment,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::User => "User",
            Self::Post => "Post",
            Self::Comment => "Comment",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name. Not unique.
    pub name: String,
    /// E-mail address, unique across all users.
    pub email: String,
}

/// Payload for `POST /users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: String,
}

impl NewUser {
    /// Return a copy with every field trimmed, or the first empty field.
    pub fn validated(&self) -> Result<Self, FieldError> {
        Ok(Self {
            name: require("name", &self.name)?,
            email: require("email", &self.email)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// A persisted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Post title, used as its display label.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author.
    pub user_id: UserId,
}

/// Payload for `POST /posts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author; must already exist.
    pub user_id: UserId,
}

impl NewPost {
    /// Return a copy with every text field trimmed, or the first empty field.
    pub fn validated(&self) -> Result<Self, FieldError> {
        Ok(Self {
            title: require("title", &self.title)?,
            content: require("content", &self.content)?,
            user_id: self.user_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned identifier.
    pub id: CommentId,
    /// Comment body.
    pub content: String,
    /// The post being commented on.
    pub post_id: PostId,
    /// Author.
    pub user_id: UserId,
}

/// Payload for `POST /comments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Comment body.
    pub content: String,
    /// Target post; must already exist.
    pub post_id: PostId,
    /// Author; must already exist.
    pub user_id: UserId,
}

impl NewComment {
    /// Return a copy with the content trimmed, or the empty field.
    pub fn validated(&self) -> Result<Self, FieldError> {
        Ok(Self {
            content: require("content", &self.content)?,
            post_id: self.post_id,
            user_id: self.user_id,
        })
    }
}
