//! Type-safe identifier wrappers around store-assigned integers.
//!
//! Every entity has a strongly-typed ID so a post id can never be passed
//! where a user id is expected. Values are assigned by the store
//! (`GENERATED ALWAYS AS IDENTITY` in `PostgreSQL`, a per-table counter in
//! the memory store) and are never reused. On the wire an id is a plain
//! JSON number.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`i64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a user.
    UserId
}

define_id! {
    /// Unique identifier for a post.
    PostId
}

define_id! {
    /// Unique identifier for a comment.
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serializes_as_bare_number() {
        let json = serde_json::to_string(&UserId(42)).ok();
        assert_eq!(json.as_deref(), Some("42"));

        let restored: Result<PostId, _> = serde_json::from_str("7");
        assert_eq!(restored.ok(), Some(PostId(7)));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = CommentId(13);
        assert_eq!(id.to_string(), "13");
        assert_eq!(i64::from(id), id.into_inner());
    }
}
