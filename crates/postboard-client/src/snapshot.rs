//! Local copy of the server's collections.
//!
//! The client works from an explicit snapshot: views and label maps are
//! built from whatever the last [`Snapshot::refresh`] fetched, never from
//! a live query mid-render.

use postboard_types::{Comment, Post, PostId, User, UserId};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::labels::{LabelMap, TieBreak};

/// Users, posts and comments as of the last refresh.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// All users, in server order.
    pub users: Vec<User>,
    /// All posts, in server order.
    pub posts: Vec<Post>,
    /// All comments, in server order.
    pub comments: Vec<Comment>,
}

impl Snapshot {
    /// Fetch all three collections and replace the snapshot.
    ///
    /// If any fetch fails the previous contents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] raised by the listing calls.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        let (users, posts, comments) = tokio::try_join!(
            client.list_users(),
            client.list_posts(),
            client.list_comments(),
        )?;

        tracing::debug!(
            users = users.len(),
            posts = posts.len(),
            comments = comments.len(),
            "Snapshot refreshed"
        );

        *self = Self {
            users,
            posts,
            comments,
        };
        Ok(())
    }

    /// Name to id mapping over the snapshot's users.
    pub fn user_labels(&self, policy: TieBreak) -> LabelMap<UserId> {
        LabelMap::from_users(&self.users, policy)
    }

    /// Title to id mapping over the snapshot's posts.
    pub fn post_labels(&self, policy: TieBreak) -> LabelMap<PostId> {
        LabelMap::from_posts(&self.posts, policy)
    }
}
