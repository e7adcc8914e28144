use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub vendor_code: String,
    pub ip_address: Option<String>,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A user joined with the code of their primary role, if any.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserWithRole {
    #[sqlx(flatten)]
    pub user: User,
    pub role_code: Option<String>,
}
