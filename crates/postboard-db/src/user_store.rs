//! Insert and list operations on the `users` table.

use postboard_types::{NewUser, User, UserId};
use sqlx::PgPool;

use crate::error::{StoreError, Violation};

/// Operations on the `users` table.
pub struct UserStore<'a> {
    pool: &'a PgPool,
}

impl<'a> UserStore<'a> {
    /// Create a new user store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user and return it with its generated id.
    ///
    /// The payload must already be validated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Uniqueness`] if the e-mail is taken.
    pub async fn insert(&self, user: &NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"INSERT INTO users (name, email)
              VALUES ($1, $2)
              RETURNING id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match Violation::of(&e) {
            Some(Violation::Unique(_)) => StoreError::Uniqueness {
                field: "email",
                value: user.email.clone(),
            },
            _ => StoreError::from(e),
        })?;

        tracing::debug!(user_id = row.id, "Inserted user");
        Ok(row.into())
    }

    /// List every user in id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the pool cannot reach the server.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"SELECT id, name, email
              FROM users
              ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    /// Identity column.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique e-mail address.
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}
