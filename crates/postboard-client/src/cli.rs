//! Command-line definition for the presentation client.

use clap::{Args, Parser, Subcommand, ValueEnum};
use postboard_client::{Consistency, DEFAULT_BASE_URL, TieBreak};

/// Postboard client: list and create users, posts and comments.
#[derive(Debug, Parser)]
#[command(name = "postboard-client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the API server.
    #[arg(long, global = true, env = "POSTBOARD_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Read lists from the primary so a just-created entity is visible.
    #[arg(long, global = true)]
    pub strong: bool,

    /// Resolve a duplicated name or title to the first listed entity
    /// instead of the last.
    #[arg(long, global = true)]
    pub first_wins: bool,
}

impl Cli {
    pub const fn consistency(&self) -> Consistency {
        if self.strong {
            Consistency::Strong
        } else {
            Consistency::Eventual
        }
    }

    pub const fn tie_break(&self) -> TieBreak {
        if self.first_wins {
            TieBreak::FirstWins
        } else {
            TieBreak::LastWins
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one collection as a table
    List {
        #[arg(value_enum)]
        collection: Collection,
    },
    /// Create a user
    AddUser(UserArgs),
    /// Create a post, picking the author by name
    AddPost(PostArgs),
    /// Create a comment, picking the post by title and the author by name
    AddComment(CommentArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Collection {
    Users,
    Posts,
    Comments,
}

#[derive(Debug, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    /// Author name
    #[arg(long)]
    pub user: String,
}

#[derive(Debug, Args)]
pub struct CommentArgs {
    #[arg(long)]
    pub content: String,
    /// Title of the post to comment on
    #[arg(long)]
    pub post: String,
    /// Author name
    #[arg(long)]
    pub user: String,
}
