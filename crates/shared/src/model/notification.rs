use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub notification_id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
}
