//! Blog model -> entity mapper

use blog_core::entities::Blog;
use blog_core::value_objects::{BlogId, UserId};

use crate::models::BlogModel;

impl From<BlogModel> for Blog {
    fn from(model: BlogModel) -> Self {
        Blog {
            id: BlogId::from_uuid(model.blog_id),
            author_id: UserId::from_uuid(model.author_id),
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            category: model.category,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
