//! Task kinds and their wire payload

use blog_core::{CommentId, UserId};
use blog_queue::TaskKind;
use serde::{Deserialize, Serialize};

/// The task types this service produces and consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTaskKind {
    Like,
    Dislike,
}

impl CommentTaskKind {
    pub const ALL: [Self; 2] = [Self::Like, Self::Dislike];
}

impl TaskKind for CommentTaskKind {
    fn type_name(self) -> &'static str {
        match self {
            Self::Like => "comment:like",
            Self::Dislike => "comment:dislike",
        }
    }

    fn parse(type_name: &str) -> Option<Self> {
        match type_name {
            "comment:like" => Some(Self::Like),
            "comment:dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// `{"user_id": "<uuid>", "comment_id": "<uuid>"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionPayload {
    pub user_id: UserId,
    pub comment_id: CommentId,
}

impl ReactionPayload {
    pub fn new(user_id: UserId, comment_id: CommentId) -> Self {
        Self {
            user_id,
            comment_id,
        }
    }
}
