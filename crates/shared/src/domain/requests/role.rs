use crate::domain::RoleCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 2, max = 50, message = "Role name must be 2-50 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 30, message = "Role code must be 2-30 characters"))]
    pub code: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(min = 2, max = 50, message = "Role name must be 2-50 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignRoleRequest {
    pub role_code: RoleCode,

    #[serde(default)]
    pub is_primary: bool,
}
