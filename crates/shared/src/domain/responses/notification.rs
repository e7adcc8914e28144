use crate::model::Notification;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NotificationResponse {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<i32>,
    pub created_at: Option<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        NotificationResponse {
            id: value.notification_id,
            title: value.title,
            message: value.message,
            is_read: value.is_read,
            related_entity_type: value.related_entity_type,
            related_entity_id: value.related_entity_id,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
