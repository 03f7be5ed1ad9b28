//! User model -> entity mapper

use blog_core::entities::User;
use blog_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.user_id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            role: model.role,
            about: model.about,
            avatar: model.avatar,
            phone_number: model.phone_number,
            address: model.address,
            city: model.city,
            country: model.country,
            gender: model.gender,
            postcode: model.postcode,
            birthday: model.birthday,
            created_at: model.created_at,
            updated_at: model.updated_at,
            login_date: model.login_date,
        }
    }
}
