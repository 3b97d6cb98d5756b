//! Integration tests for the presentation client.
//!
//! Error decoding is exercised against a mock server; the full create
//! and list flow runs against the real router bound to a loopback port
//! with the in-memory store behind it.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use postboard_api::{AppState, build_router};
use postboard_client::{
    ApiClient, ClientError, CommentForm, Consistency, PostForm, Snapshot, TieBreak, UserForm,
    render,
};
use postboard_db::{MemoryStore, ReplicationMode, Storage};
use postboard_types::{EntityKind, NewUser, User, UserId};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_api(mode: ReplicationMode) -> (String, MemoryStore) {
    let store = MemoryStore::new(mode);
    let state = Arc::new(AppState::new(Storage::Memory(store.clone())));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    (format!("http://{addr}"), store)
}

// =========================================================================
// Mock server
// =========================================================================

#[tokio::test]
async fn test_conflict_carries_server_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "email `ada@x.com` is already taken",
            "kind": "uniqueness_error",
            "status": 409,
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client
        .create_user(&NewUser {
            name: String::from("Ada"),
            email: String::from("ada@x.com"),
        })
        .await
        .unwrap_err();

    assert_eq!(err.api_kind(), Some("uniqueness_error"));
    assert!(matches!(
        err,
        ClientError::Api { status: 409, ref message, .. } if message.contains("already taken")
    ));
}

#[tokio::test]
async fn test_plain_text_error_body_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client.list_posts().await.unwrap_err();

    assert_eq!(err.api_kind(), None);
    assert!(matches!(
        err,
        ClientError::Api { status: 502, ref message, .. } if message == "bad gateway"
    ));
}

#[tokio::test]
async fn test_strong_consistency_sets_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .and(query_param("consistency", "strong"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Ada", "email": "ada@x.com" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/", server.uri()))
        .unwrap()
        .with_consistency(Consistency::Strong);
    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users.first().map(|u| u.id.into_inner()), Some(3));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ada", "email": "ada@x.com" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "storage unavailable",
            "kind": "storage_unavailable",
            "status": 503,
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let mut snapshot = Snapshot {
        users: vec![User {
            id: UserId(7),
            name: String::from("Grace"),
            email: String::from("grace@x.com"),
        }],
        ..Snapshot::default()
    };
    let err = snapshot.refresh(&client).await.unwrap_err();

    assert_eq!(err.api_kind(), Some("storage_unavailable"));
    assert_eq!(
        snapshot.users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        ["Grace"]
    );
}

#[tokio::test]
async fn test_blank_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let form = UserForm {
        name: String::from("Ada"),
        email: String::from("   "),
    };
    let err = form.submit(&client).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_user_creation_needs_no_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Ada", "email": "ada@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let user = UserForm {
        name: String::from("Ada"),
        email: String::from("ada@x.com"),
    }
    .submit(&client)
    .await
    .unwrap();
    assert_eq!(user.id, UserId(4));
}

// =========================================================================
// Live router
// =========================================================================

#[tokio::test]
async fn test_create_and_list_through_labels() {
    let (url, _) = spawn_api(ReplicationMode::Synchronous).await;
    let client = ApiClient::new(&url).unwrap();
    let mut snapshot = Snapshot::default();

    let ada = UserForm {
        name: String::from("Ada"),
        email: String::from("ada@x.com"),
    }
    .submit(&client)
    .await
    .unwrap();
    assert_eq!(ada.id.into_inner(), 1);

    snapshot.refresh(&client).await.unwrap();
    let post = PostForm {
        title: String::from("Hello"),
        content: String::from("First post"),
        author: String::from("Ada"),
    }
    .submit(&client, &snapshot.user_labels(TieBreak::default()))
    .await
    .unwrap();
    assert_eq!(post.user_id, ada.id);

    snapshot.refresh(&client).await.unwrap();
    let comment = CommentForm {
        content: String::from("Nice"),
        post: String::from("Hello"),
        author: String::from("Ada"),
    }
    .submit(
        &client,
        &snapshot.post_labels(TieBreak::default()),
        &snapshot.user_labels(TieBreak::default()),
    )
    .await
    .unwrap();
    assert_eq!(comment.post_id, post.id);

    snapshot.refresh(&client).await.unwrap();
    let table = render::comments(&snapshot);
    assert!(table.lines().nth(2).is_some_and(|l| l.ends_with("Hello  Ada")));
}

#[tokio::test]
async fn test_unknown_label_never_reaches_server() {
    let (url, store) = spawn_api(ReplicationMode::Synchronous).await;
    let client = ApiClient::new(&url).unwrap();
    let mut snapshot = Snapshot::default();
    snapshot.refresh(&client).await.unwrap();

    let err = PostForm {
        title: String::from("T"),
        content: String::from("C"),
        author: String::from("Ghost"),
    }
    .submit(&client, &snapshot.user_labels(TieBreak::default()))
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ClientError::UnknownReference { kind: EntityKind::User, ref label } if label == "Ghost"
    ));
    assert!(store.list_posts(postboard_db::ReadTarget::Primary).unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_surfaces_as_uniqueness() {
    let (url, _) = spawn_api(ReplicationMode::Synchronous).await;
    let client = ApiClient::new(&url).unwrap();
    let form = UserForm {
        name: String::from("Ada"),
        email: String::from("ada@x.com"),
    };

    form.submit(&client).await.unwrap();
    let err = form.submit(&client).await.unwrap_err();
    assert_eq!(err.api_kind(), Some("uniqueness_error"));
}

#[tokio::test]
async fn test_refresh_after_write_may_lag_unless_strong() {
    let (url, store) = spawn_api(ReplicationMode::Manual).await;
    let eventual = ApiClient::new(&url).unwrap();
    let strong = eventual.clone().with_consistency(Consistency::Strong);

    UserForm {
        name: String::from("Ada"),
        email: String::from("ada@x.com"),
    }
    .submit(&eventual)
    .await
    .unwrap();

    let mut snapshot = Snapshot::default();
    snapshot.refresh(&eventual).await.unwrap();
    assert!(snapshot.users.is_empty());

    snapshot.refresh(&strong).await.unwrap();
    assert_eq!(snapshot.users.len(), 1);

    store.sync_replica();
    snapshot.refresh(&eventual).await.unwrap();
    assert_eq!(snapshot.users.len(), 1);
}
