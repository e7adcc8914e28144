use crate::model::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Option<String>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        RoleResponse {
            id: value.role_id,
            name: value.role_name,
            code: value.role_code,
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}
