//! Insert and list operations on the `comments` table.

use postboard_types::{Comment, CommentId, EntityKind, NewComment, PostId, UserId};
use sqlx::PgPool;

use crate::error::{StoreError, Violation};

/// Name of the foreign-key constraint from `comments.post_id` to `posts.id`.
const POST_FK: &str = "comments_post_id_fkey";

/// Operations on the `comments` table.
pub struct CommentStore<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentStore<'a> {
    /// Create a new comment store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReferentialIntegrity`] naming whichever of
    /// `post_id` or `user_id` the database reported as dangling.
    pub async fn insert(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r"INSERT INTO comments (content, post_id, user_id)
              VALUES ($1, $2, $3)
              RETURNING id, content, post_id, user_id",
        )
        .bind(&comment.content)
        .bind(comment.post_id.into_inner())
        .bind(comment.user_id.into_inner())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match Violation::of(&e) {
            Some(Violation::ForeignKey(constraint)) => dangling_reference(comment, constraint.as_deref()),
            _ => StoreError::from(e),
        })?;

        tracing::debug!(
            comment_id = row.id,
            post_id = row.post_id,
            user_id = row.user_id,
            "Inserted comment"
        );
        Ok(row.into())
    }

    /// List every comment in id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the pool cannot reach the server.
    pub async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r"SELECT id, content, post_id, user_id
              FROM comments
              ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

fn dangling_reference(comment: &NewComment, constraint: Option<&str>) -> StoreError {
    if constraint == Some(POST_FK) {
        StoreError::ReferentialIntegrity {
            field: "post_id",
            id: comment.post_id.into_inner(),
            target: EntityKind::Post,
        }
    } else {
        StoreError::ReferentialIntegrity {
            field: "user_id",
            id: comment.user_id.into_inner(),
            target: EntityKind::User,
        }
    }
}

/// A row from the `comments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    /// Identity column.
    pub id: i64,
    /// Comment body.
    pub content: String,
    /// Target post foreign key.
    pub post_id: i64,
    /// Author foreign key.
    pub user_id: i64,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId(row.id),
            content: row.content,
            post_id: PostId(row.post_id),
            user_id: UserId(row.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewComment {
        NewComment {
            content: String::from("hi"),
            post_id: PostId(5),
            user_id: UserId(9),
        }
    }

    #[test]
    fn post_constraint_blames_post_id() {
        let err = dangling_reference(&payload(), Some(POST_FK));
        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity { field: "post_id", id: 5, target: EntityKind::Post }
        ));
    }

    #[test]
    fn other_constraint_blames_user_id() {
        let err = dangling_reference(&payload(), Some("comments_user_id_fkey"));
        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity { field: "user_id", id: 9, target: EntityKind::User }
        ));
    }
}
