//! Insert and list operations on the `posts` table.

use postboard_types::{EntityKind, NewPost, Post, PostId, UserId};
use sqlx::PgPool;

use crate::error::{StoreError, Violation};

/// Operations on the `posts` table.
pub struct PostStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PostStore<'a> {
    /// Create a new post store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReferentialIntegrity`] if `user_id` does not
    /// reference an existing user.
    pub async fn insert(&self, post: &NewPost) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            r"INSERT INTO posts (title, content, user_id)
              VALUES ($1, $2, $3)
              RETURNING id, title, content, user_id",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.user_id.into_inner())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match Violation::of(&e) {
            Some(Violation::ForeignKey(_)) => StoreError::ReferentialIntegrity {
                field: "user_id",
                id: post.user_id.into_inner(),
                target: EntityKind::User,
            },
            _ => StoreError::from(e),
        })?;

        tracing::debug!(post_id = row.id, user_id = row.user_id, "Inserted post");
        Ok(row.into())
    }

    /// List every post in id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the pool cannot reach the server.
    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r"SELECT id, title, content, user_id
              FROM posts
              ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

/// A row from the `posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    /// Identity column.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author foreign key.
    pub user_id: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId(row.id),
            title: row.title,
            content: row.content,
            user_id: UserId(row.user_id),
        }
    }
}
