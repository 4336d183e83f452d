use super::{format_id, format_timestamp};
use crate::models::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl CreateUserRequest {
    pub fn into_user(self, created_at: DateTime<Utc>) -> User {
        User {
            id: None,
            name: self.name,
            email: self.email,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: format_id(user.id),
            name: user.name,
            email: user.email,
            created_at: format_timestamp(user.created_at),
        }
    }
}
