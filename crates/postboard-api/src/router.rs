//! Axum router construction for the REST API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `GET|POST /users/` -- list / create users
/// - `GET|POST /posts/` -- list / create posts
/// - `GET|POST /comments/` -- list / create comments
///
/// Each collection is reachable with and without the trailing slash.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let users = get(handlers::list_users).post(handlers::create_user);
    let posts = get(handlers::list_posts).post(handlers::create_post);
    let comments = get(handlers::list_comments).post(handlers::create_comment);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/users/", users.clone())
        .route("/users", users)
        .route("/posts/", posts.clone())
        .route("/posts", posts)
        .route("/comments/", comments.clone())
        .route("/comments", comments)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
