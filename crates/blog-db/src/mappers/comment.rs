//! Comment model -> entity mappers

use blog_core::entities::{Comment, CommentDetails};
use blog_core::value_objects::{BlogId, CommentId, UserId};

use crate::models::{CommentDetailsModel, CommentModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::from_uuid(model.comment_id),
            author_id: UserId::from_uuid(model.author_id),
            blog_id: BlogId::from_uuid(model.blog_id),
            message: model.message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommentDetailsModel> for CommentDetails {
    fn from(model: CommentDetailsModel) -> Self {
        CommentDetails {
            comment: Comment {
                id: CommentId::from_uuid(model.comment_id),
                author_id: UserId::from_uuid(model.author_id),
                blog_id: BlogId::from_uuid(model.blog_id),
                message: model.message,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            author: model.author.unwrap_or_default(),
            avatar_url: model.avatar_url,
            likes: model.likes,
        }
    }
}
