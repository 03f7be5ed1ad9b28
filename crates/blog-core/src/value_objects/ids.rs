//! Typed identifiers
//!
//! Every entity is keyed by a UUID. Each kind of id gets its own newtype so a
//! `CommentId` can never be passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error when parsing an id from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id format")]
pub struct IdParseError {
    pub kind: &'static str,
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// The all-zero id, never assigned to a stored row
            #[inline]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| IdParseError { kind: $kind })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(
    /// Identifies a registered user
    UserId,
    "user"
);
typed_id!(
    /// Identifies a blog post
    BlogId,
    "blog"
);
typed_id!(
    /// Identifies a comment on a blog post
    CommentId,
    "comment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert!(!CommentId::new().is_nil());
        assert!(BlogId::default().is_nil());
    }

    #[test]
    fn test_parse_and_display() {
        let raw = "6f9619ff-8b86-d011-b42d-00cf4fc964ff";
        let id: CommentId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_parse_invalid() {
        let err = UserId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, "user");
        assert_eq!(err.to_string(), "invalid user id format");
    }

    #[test]
    fn test_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = BlogId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));

        let back: BlogId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
