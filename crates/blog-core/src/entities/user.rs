//! User entity - a registered blog author or reader

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::UserId;

/// User account. The password hash never lives on the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub postcode: Option<i32>,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub login_date: DateTime<Utc>,
}

impl User {
    pub const DEFAULT_ROLE: &'static str = "user";

    /// Create a new User with required fields
    pub fn new(id: UserId, first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name,
            last_name,
            email: Self::normalize_email(&email),
            role: Some(Self::DEFAULT_ROLE.to_string()),
            about: None,
            avatar: None,
            phone_number: None,
            address: None,
            city: None,
            country: None,
            gender: None,
            postcode: None,
            birthday: None,
            created_at: now,
            updated_at: now,
            login_date: now,
        }
    }

    /// Display name used on comments
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Emails are stored trimmed and lower-cased
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
