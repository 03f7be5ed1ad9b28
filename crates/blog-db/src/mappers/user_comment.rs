//! UserComment model -> entity mapper

use blog_core::entities::UserComment;
use blog_core::value_objects::{CommentId, UserId};

use crate::models::UserCommentModel;

impl From<UserCommentModel> for UserComment {
    fn from(model: UserCommentModel) -> Self {
        UserComment {
            user_id: UserId::from_uuid(model.user_id),
            comment_id: CommentId::from_uuid(model.comment_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
