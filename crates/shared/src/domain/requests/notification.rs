use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllNotifications {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i32,

    #[serde(default)]
    pub unread_only: bool,
}

impl Default for FindAllNotifications {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            unread_only: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<i32>,
}

impl CreateNotificationRequest {
    pub fn new(user_id: i32, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: message.into(),
            related_entity_type: None,
            related_entity_id: None,
        }
    }

    pub fn related_to(mut self, entity_type: &str, entity_id: i32) -> Self {
        self.related_entity_type = Some(entity_type.to_string());
        self.related_entity_id = Some(entity_id);
        self
    }
}
