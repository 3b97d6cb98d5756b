//! Command-line presentation client for the Postboard REST API.
//!
//! `list`, `add-post` and `add-comment` load a snapshot first; `add-user`
//! needs no labels and submits straight away. Every create then refreshes
//! the snapshot and prints the updated table. Without `--strong` that
//! listing comes from the replica and may not show the new row yet.

mod cli;

use anyhow::Context;
use clap::Parser;
use postboard_client::{
    ApiClient, ClientError, CommentForm, LabelMap, PostForm, Snapshot, UserForm, render,
};
use postboard_types::{EntityKind, PostId, UserId};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Collection, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url)?.with_consistency(cli.consistency());
    let policy = cli.tie_break();
    let mut snapshot = Snapshot::default();

    let shown = match cli.command {
        Command::List { collection } => {
            load(&mut snapshot, &client).await?;
            print!("{}", table(&snapshot, collection));
            return Ok(());
        }
        Command::AddUser(args) => {
            let form = UserForm {
                name: args.name,
                email: args.email,
            };
            let user = form.submit(&client).await.context("could not add user")?;
            println!("User added with ID {}", user.id);
            Collection::Users
        }
        Command::AddPost(args) => {
            load(&mut snapshot, &client).await?;
            let users = snapshot.user_labels(policy);
            let form = PostForm {
                title: args.title,
                content: args.content,
                author: args.user,
            };
            let post = form
                .submit(&client, &users)
                .await
                .map_err(|e| with_choices(e, None, &users))
                .context("could not add post")?;
            println!("Post added with ID {}", post.id);
            Collection::Posts
        }
        Command::AddComment(args) => {
            load(&mut snapshot, &client).await?;
            let posts = snapshot.post_labels(policy);
            let users = snapshot.user_labels(policy);
            let form = CommentForm {
                content: args.content,
                post: args.post,
                author: args.user,
            };
            let comment = form
                .submit(&client, &posts, &users)
                .await
                .map_err(|e| with_choices(e, Some(&posts), &users))
                .context("could not add comment")?;
            println!("Comment added with ID {}", comment.id);
            Collection::Comments
        }
    };

    snapshot
        .refresh(&client)
        .await
        .context("entity was created but the listing could not be refreshed")?;
    println!();
    print!("{}", table(&snapshot, shown));
    Ok(())
}

async fn load(snapshot: &mut Snapshot, client: &ApiClient) -> anyhow::Result<()> {
    snapshot
        .refresh(client)
        .await
        .with_context(|| format!("could not load data from {}", client.base_url()))
}

fn table(snapshot: &Snapshot, collection: Collection) -> String {
    match collection {
        Collection::Users => render::users(snapshot),
        Collection::Posts => render::posts(snapshot),
        Collection::Comments => render::comments(snapshot),
    }
}

/// Attach the valid choices to an unknown-label error.
fn with_choices(
    err: ClientError,
    posts: Option<&LabelMap<PostId>>,
    users: &LabelMap<UserId>,
) -> anyhow::Error {
    let labels = match &err {
        ClientError::UnknownReference {
            kind: EntityKind::Post,
            ..
        } => posts.map(LabelMap::labels),
        ClientError::UnknownReference {
            kind: EntityKind::User,
            ..
        } => Some(users.labels()),
        _ => None,
    };

    match labels {
        Some([]) => anyhow::anyhow!("{err}; nothing to choose from yet"),
        Some(labels) => {
            let mut distinct: Vec<&str> = Vec::with_capacity(labels.len());
            for label in labels {
                if !distinct.contains(&label.as_str()) {
                    distinct.push(label.as_str());
                }
            }
            anyhow::anyhow!("{err}; choose one of: {}", distinct.join(", "))
        }
        None => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use postboard_client::TieBreak;

    use super::*;

    fn users() -> LabelMap<UserId> {
        LabelMap::build(
            [(UserId(1), "Ada"), (UserId(2), "Grace"), (UserId(3), "Ada")],
            TieBreak::LastWins,
        )
    }

    #[test]
    fn unknown_user_lists_distinct_names() {
        let err = ClientError::UnknownReference {
            kind: EntityKind::User,
            label: String::from("Linus"),
        };
        let message = with_choices(err, None, &users()).to_string();
        assert!(message.ends_with("choose one of: Ada, Grace"));
    }

    #[test]
    fn unknown_post_with_no_posts_says_so() {
        let posts = LabelMap::from_posts(&[], TieBreak::LastWins);
        let err = ClientError::UnknownReference {
            kind: EntityKind::Post,
            label: String::from("Hello"),
        };
        let message = with_choices(err, Some(&posts), &users()).to_string();
        assert!(message.ends_with("nothing to choose from yet"));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = ClientError::Api {
            status: 409,
            kind: Some(String::from("uniqueness_error")),
            message: String::from("taken"),
        };
        assert_eq!(
            with_choices(err, None, &users()).to_string(),
            "server returned 409: taken"
        );
    }
}
