use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRole {
    pub user_role_id: i32,
    pub user_id: i32,
    pub role_id: i32,
    pub is_primary: bool,
    pub created_at: Option<NaiveDateTime>,
}
