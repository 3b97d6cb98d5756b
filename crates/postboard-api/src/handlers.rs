//! REST API endpoint handlers.
//!
//! Create handlers are thin pass-throughs to the storage write path, which
//! validates and inserts on the primary. Bodies that do not deserialize
//! are answered as validation errors too. List handlers read from the
//! replica unless the request asks for `consistency=strong`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use postboard_db::ReadTarget;
use postboard_types::{Comment, NewComment, NewPost, NewUser, Post, User};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Read consistency requested by a list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    /// Serve from the replica; may miss very recent writes.
    #[default]
    Eventual,
    /// Serve from the primary.
    Strong,
}

impl From<Consistency> for ReadTarget {
    fn from(consistency: Consistency) -> Self {
        match consistency {
            Consistency::Eventual => Self::Replica,
            Consistency::Strong => Self::Primary,
        }
    }
}

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    /// `eventual` (default) or `strong`.
    pub consistency: Option<Consistency>,
}

impl ListQuery {
    fn target(&self) -> ReadTarget {
        self.consistency.unwrap_or_default().into()
    }
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe. Does not touch storage.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// /users/
// ---------------------------------------------------------------------------

/// Create a user.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(payload) = payload?;
    let user = state.storage.create_user(&payload).await?;
    Ok(Json(user))
}

/// List all users.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    let Query(query) = query?;
    let users = state.storage.list_users(query.target()).await?;
    Ok(Json(users))
}

// ---------------------------------------------------------------------------
// /posts/
// ---------------------------------------------------------------------------

/// Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewPost>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let Json(payload) = payload?;
    let post = state.storage.create_post(&payload).await?;
    Ok(Json(post))
}

/// List all posts.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let Query(query) = query?;
    let posts = state.storage.list_posts(query.target()).await?;
    Ok(Json(posts))
}

// ---------------------------------------------------------------------------
// /comments/
// ---------------------------------------------------------------------------

/// Create a comment.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<Json<Comment>, ApiError> {
    let Json(payload) = payload?;
    let comment = state.storage.create_comment(&payload).await?;
    Ok(Json(comment))
}

/// List all comments.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let Query(query) = query?;
    let comments = state.storage.list_comments(query.target()).await?;
    Ok(Json(comments))
}
