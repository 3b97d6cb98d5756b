//! HTTP client for the Postboard REST API.
//!
//! One shared [`reqwest::Client`] issues every request. Non-2xx responses
//! are turned into [`ClientError::Api`] carrying the server's failure
//! kind when the body has one.

use std::time::Duration;

use postboard_types::{Comment, NewComment, NewPost, NewUser, Post, User};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Default base URL of the API server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which storage target list calls ask the server to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consistency {
    /// Let the server use its replica; very recent writes may be missing.
    #[default]
    Eventual,
    /// Ask the server to read from its primary.
    Strong,
}

impl Consistency {
    const fn query(self) -> &'static str {
        match self {
            Self::Eventual => "",
            Self::Strong => "?consistency=strong",
        }
    }
}

/// Client for the REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    consistency: Consistency,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            consistency: Consistency::default(),
        })
    }

    /// Use `consistency` for every list call.
    #[must_use]
    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /users/`.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.fetch("/users/").await
    }

    /// `GET /posts/`.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.fetch("/posts/").await
    }

    /// `GET /comments/`.
    pub async fn list_comments(&self) -> Result<Vec<Comment>, ClientError> {
        self.fetch("/comments/").await
    }

    /// `POST /users/`.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        self.add("/users/", user).await
    }

    /// `POST /posts/`.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ClientError> {
        self.add("/posts/", post).await
    }

    /// `POST /comments/`.
    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment, ClientError> {
        self.add("/comments/", comment).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}{}", self.base_url, self.consistency.query());
        tracing::debug!(url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }

    async fn add<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        decode(response).await
    }
}

/// Decode a 2xx body as `T`, or turn anything else into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_owned());
    let (kind, message) = match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => (
            json.get("kind")
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned),
            json.get("error")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| text.clone(), ToOwned::to_owned),
        ),
        Err(_) => (None, text),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}
