use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100, message = "Category name must be 2-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}
