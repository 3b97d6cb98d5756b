//! Demo data seeding.
//!
//! Inserts users, then posts by randomly chosen seeded users, then
//! comments on randomly chosen seeded posts, all through the normal write
//! path. E-mail collisions with existing rows are skipped so the seeder
//! can be re-run against a populated database.

use postboard_types::{Comment, NewComment, NewPost, NewUser, Post, PostId, User, UserId};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::StoreError;
use crate::storage::Storage;

/// First names the seeder draws from.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John",
    "Ken", "Leslie", "Linus", "Margaret", "Niklaus", "Radia", "Robin", "Sophie", "Tony", "Yukihiro",
];

/// Mail domains the seeder draws from.
const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Words for generated titles and bodies.
const WORDS: &[&str] = &[
    "replica", "primary", "lag", "write", "read", "index", "table", "query", "commit", "row",
    "cache", "snapshot", "label", "comment", "post", "schema", "pool", "retry", "gate", "board",
];

/// How many of each entity to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedPlan {
    /// Users to create.
    pub users: usize,
    /// Posts to create, each by a random seeded user.
    pub posts: usize,
    /// Comments to create, each on a random seeded post by a random seeded user.
    pub comments: usize,
}

impl SeedPlan {
    /// Whether the plan creates nothing.
    pub const fn is_empty(&self) -> bool {
        self.users == 0 && self.posts == 0 && self.comments == 0
    }
}

/// Everything one [`seed`] run created.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Created users.
    pub users: Vec<User>,
    /// Created posts.
    pub posts: Vec<Post>,
    /// Created comments.
    pub comments: Vec<Comment>,
}

/// Build one random user payload.
pub fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> NewUser {
    let name = FIRST_NAMES.choose(rng).copied().unwrap_or("User");
    let domain = DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let tag: u32 = rng.random_range(1000..1_000_000);
    NewUser {
        name: name.to_owned(),
        email: format!("{}.{tag}@{domain}", name.to_lowercase()),
    }
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let text = (0..words.max(1))
        .map(|_| WORDS.choose(rng).copied().unwrap_or("word"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}.", first.to_uppercase(), chars.as_str())
    })
}

/// Insert `count` random users and return the ones that were created.
///
/// # Errors
///
/// Returns any error other than [`StoreError::Uniqueness`], which is
/// logged and skipped.
pub async fn seed_users<R: Rng + ?Sized>(
    storage: &Storage,
    count: usize,
    rng: &mut R,
) -> Result<Vec<User>, StoreError> {
    let mut created = Vec::with_capacity(count);
    for _ in 0..count {
        let payload = fake_user(rng);
        match storage.create_user(&payload).await {
            Ok(user) => created.push(user),
            Err(StoreError::Uniqueness { value, .. }) => {
                tracing::debug!(email = value, "Seed e-mail already taken, skipping");
            }
            Err(e) => return Err(e),
        }
    }
    tracing::info!(requested = count, inserted = created.len(), "Seeded users");
    Ok(created)
}

/// Insert `count` random posts, each by an author drawn from `authors`.
///
/// Nothing is inserted when `authors` is empty.
pub async fn seed_posts<R: Rng + ?Sized>(
    storage: &Storage,
    authors: &[UserId],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Post>, StoreError> {
    let mut created = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&user_id) = authors.choose(rng) else {
            tracing::warn!(requested = count, "No seeded users to author posts");
            break;
        };
        let words = rng.random_range(3..7);
        let payload = NewPost {
            title: sentence(rng, words),
            content: sentence(rng, 24),
            user_id,
        };
        created.push(storage.create_post(&payload).await?);
    }
    tracing::info!(requested = count, inserted = created.len(), "Seeded posts");
    Ok(created)
}

/// Insert `count` random comments on `posts` by `authors`.
///
/// Nothing is inserted when either slice is empty.
pub async fn seed_comments<R: Rng + ?Sized>(
    storage: &Storage,
    posts: &[PostId],
    authors: &[UserId],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Comment>, StoreError> {
    let mut created = Vec::with_capacity(count);
    for _ in 0..count {
        let (Some(&post_id), Some(&user_id)) = (posts.choose(rng), authors.choose(rng)) else {
            tracing::warn!(requested = count, "No seeded posts or users to comment with");
            break;
        };
        let words = rng.random_range(4..12);
        let payload = NewComment {
            content: sentence(rng, words),
            post_id,
            user_id,
        };
        created.push(storage.create_comment(&payload).await?);
    }
    tracing::info!(requested = count, inserted = created.len(), "Seeded comments");
    Ok(created)
}

/// Seed users, then posts by those users, then comments on those posts.
///
/// # Errors
///
/// Returns the first storage error other than a skipped e-mail collision.
pub async fn seed<R: Rng + ?Sized>(
    storage: &Storage,
    plan: SeedPlan,
    rng: &mut R,
) -> Result<SeedReport, StoreError> {
    let users = seed_users(storage, plan.users, rng).await?;
    let user_ids: Vec<UserId> = users.iter().map(|u| u.id).collect();

    let posts = seed_posts(storage, &user_ids, plan.posts, rng).await?;
    let post_ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();

    let comments = seed_comments(storage, &post_ids, &user_ids, plan.comments, rng).await?;

    Ok(SeedReport {
        users,
        posts,
        comments,
    })
}
