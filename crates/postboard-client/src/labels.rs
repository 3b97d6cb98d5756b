//! Label/id mapping for foreign-key selection.
//!
//! Dependent entities are created by picking a referenced user by name or
//! a referenced post by title. A [`LabelMap`] built from a fresh listing
//! turns the picked label into an id before submission, and turns stored
//! ids back into labels for display.
//!
//! Labels are not unique. When two entities share a label the
//! [`TieBreak`] policy decides which id the label resolves to, and the
//! label is recorded as ambiguous so the caller can warn about it. Display
//! is unaffected: every id keeps its own label.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use postboard_types::{Post, PostId, User, UserId};

/// Which entity wins when several share a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The entity listed last wins.
    #[default]
    LastWins,
    /// The entity listed first wins.
    FirstWins,
}

/// Bidirectional label/id mapping over one listing.
#[derive(Debug, Clone)]
pub struct LabelMap<Id> {
    by_label: HashMap<String, Id>,
    by_id: HashMap<Id, String>,
    labels: Vec<String>,
    ambiguous: BTreeSet<String>,
}

impl<Id> LabelMap<Id>
where
    Id: Copy + Eq + Hash + core::fmt::Display,
{
    /// Build a map from `(id, label)` pairs in listing order.
    pub fn build<'a, I>(entries: I, policy: TieBreak) -> Self
    where
        I: IntoIterator<Item = (Id, &'a str)>,
    {
        let mut map = Self {
            by_label: HashMap::new(),
            by_id: HashMap::new(),
            labels: Vec::new(),
            ambiguous: BTreeSet::new(),
        };

        for (id, label) in entries {
            map.by_id.insert(id, label.to_owned());
            map.labels.push(label.to_owned());

            if map.by_label.contains_key(label) {
                map.ambiguous.insert(label.to_owned());
                if policy == TieBreak::FirstWins {
                    continue;
                }
            }
            map.by_label.insert(label.to_owned(), id);
        }

        map
    }

    /// The id `label` resolves to, if the label is known.
    pub fn resolve(&self, label: &str) -> Option<Id> {
        self.by_label.get(label).copied()
    }

    /// The label for `id`, or `ID {id}` when the id is not in the listing.
    pub fn display(&self, id: Id) -> String {
        self.by_id
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("ID {id}"))
    }

    /// Every label in listing order, duplicates included (the choice list).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether `label` is shared by more than one entity.
    pub fn is_ambiguous(&self, label: &str) -> bool {
        self.ambiguous.contains(label)
    }
}

impl LabelMap<UserId> {
    /// Map user names to user ids.
    pub fn from_users(users: &[User], policy: TieBreak) -> Self {
        Self::build(users.iter().map(|u| (u.id, u.name.as_str())), policy)
    }
}

impl LabelMap<PostId> {
    /// Map post titles to post ids.
    pub fn from_posts(posts: &[Post], policy: TieBreak) -> Self {
        Self::build(posts.iter().map(|p| (p.id, p.title.as_str())), policy)
    }
}
