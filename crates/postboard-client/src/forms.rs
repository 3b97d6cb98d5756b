//! Create forms for users, posts and comments.
//!
//! Each form holds what the user typed. Submitting is two steps:
//! [`prepare`](PostForm::prepare) trims and checks every text field, then
//! resolves the selected labels against the caller's [`LabelMap`]s;
//! only a fully prepared payload is sent. Any failure aborts before a
//! request is made.

use postboard_types::{
    Comment, EntityKind, NewComment, NewPost, NewUser, Post, PostId, User, UserId,
};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::labels::LabelMap;

/// Input for a new user.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl UserForm {
    /// Build the create payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if a field is blank.
    pub fn prepare(&self) -> Result<NewUser, ClientError> {
        let user = NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
        };
        Ok(user.validated()?)
    }

    /// Validate and send the form.
    ///
    /// # Errors
    ///
    /// Returns the [`prepare`](Self::prepare) error, or the server's.
    pub async fn submit(&self, client: &ApiClient) -> Result<User, ClientError> {
        let payload = self.prepare()?;
        client.create_user(&payload).await
    }
}

/// Input for a new post. The author is picked by name.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Name of the author.
    pub author: String,
}

impl PostForm {
    /// Build the create payload, resolving the author against `users`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank field or
    /// [`ClientError::UnknownReference`] if the author is not listed.
    pub fn prepare(&self, users: &LabelMap<UserId>) -> Result<NewPost, ClientError> {
        let draft = NewPost {
            title: self.title.clone(),
            content: self.content.clone(),
            user_id: UserId(0),
        }
        .validated()?;

        Ok(NewPost {
            user_id: lookup(users, EntityKind::User, &self.author)?,
            ..draft
        })
    }

    /// Validate, resolve and send the form.
    ///
    /// # Errors
    ///
    /// Returns the [`prepare`](Self::prepare) error, or the server's.
    pub async fn submit(
        &self,
        client: &ApiClient,
        users: &LabelMap<UserId>,
    ) -> Result<Post, ClientError> {
        let payload = self.prepare(users)?;
        client.create_post(&payload).await
    }
}

/// Input for a new comment. The post is picked by title, the author by name.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    /// Comment body.
    pub content: String,
    /// Title of the post being commented on.
    pub post: String,
    /// Name of the commenter.
    pub author: String,
}

impl CommentForm {
    /// Build the create payload, resolving the post then the author.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank field or
    /// [`ClientError::UnknownReference`] for an unlisted post or author.
    pub fn prepare(
        &self,
        posts: &LabelMap<PostId>,
        users: &LabelMap<UserId>,
    ) -> Result<NewComment, ClientError> {
        let draft = NewComment {
            content: self.content.clone(),
            post_id: PostId(0),
            user_id: UserId(0),
        }
        .validated()?;

        Ok(NewComment {
            post_id: lookup(posts, EntityKind::Post, &self.post)?,
            user_id: lookup(users, EntityKind::User, &self.author)?,
            ..draft
        })
    }

    /// Validate, resolve and send the form.
    ///
    /// # Errors
    ///
    /// Returns the [`prepare`](Self::prepare) error, or the server's.
    pub async fn submit(
        &self,
        client: &ApiClient,
        posts: &LabelMap<PostId>,
        users: &LabelMap<UserId>,
    ) -> Result<Comment, ClientError> {
        let payload = self.prepare(posts, users)?;
        client.create_comment(&payload).await
    }
}

fn lookup<Id>(map: &LabelMap<Id>, kind: EntityKind, label: &str) -> Result<Id, ClientError>
where
    Id: Copy + Eq + core::hash::Hash + core::fmt::Display,
{
    let id = map
        .resolve(label)
        .ok_or_else(|| ClientError::UnknownReference {
            kind,
            label: label.to_owned(),
        })?;
    if map.is_ambiguous(label) {
        tracing::warn!(%kind, label, %id, "Label is shared by several entities");
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use postboard_types::FieldError;

    use super::*;
    use crate::labels::TieBreak;

    fn users() -> LabelMap<UserId> {
        LabelMap::build([(UserId(1), "Ada"), (UserId(2), "Grace")], TieBreak::LastWins)
    }

    fn posts() -> LabelMap<PostId> {
        LabelMap::build([(PostId(5), "Hello")], TieBreak::LastWins)
    }

    #[test]
    fn user_form_trims_fields() {
        let form = UserForm {
            name: String::from(" Ada "),
            email: String::from("ada@x.com\n"),
        };
        let payload = form.prepare().ok();
        assert_eq!(payload.as_ref().map(|u| u.name.as_str()), Some("Ada"));
        assert_eq!(payload.map(|u| u.email), Some(String::from("ada@x.com")));
    }

    #[test]
    fn blank_field_is_rejected_before_lookup() {
        let form = PostForm {
            title: String::from("  "),
            content: String::from("C"),
            author: String::from("Nobody"),
        };
        assert!(matches!(
            form.prepare(&users()),
            Err(ClientError::Validation(FieldError::Empty { field: "title" }))
        ));
    }

    #[test]
    fn post_form_resolves_author() {
        let form = PostForm {
            title: String::from("T"),
            content: String::from("C"),
            author: String::from("Grace"),
        };
        assert_eq!(form.prepare(&users()).ok().map(|p| p.user_id), Some(UserId(2)));
    }

    #[test]
    fn unknown_author_aborts() {
        let form = PostForm {
            title: String::from("T"),
            content: String::from("C"),
            author: String::from("Linus"),
        };
        assert!(matches!(
            form.prepare(&users()),
            Err(ClientError::UnknownReference { kind: EntityKind::User, label }) if label == "Linus"
        ));
    }

    #[test]
    fn comment_form_resolves_post_and_author() {
        let form = CommentForm {
            content: String::from("nice"),
            post: String::from("Hello"),
            author: String::from("Ada"),
        };
        let payload = form.prepare(&posts(), &users()).ok();
        assert_eq!(
            payload.map(|c| (c.post_id, c.user_id)),
            Some((PostId(5), UserId(1)))
        );
    }

    #[test]
    fn comment_form_reports_missing_post_first() {
        let form = CommentForm {
            content: String::from("nice"),
            post: String::from("Gone"),
            author: String::from("Gone"),
        };
        assert!(matches!(
            form.prepare(&posts(), &users()),
            Err(ClientError::UnknownReference { kind: EntityKind::Post, .. })
        ));
    }
}
