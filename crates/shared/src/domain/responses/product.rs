use crate::model::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub seller_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub moq: i32,
    pub quantity: i32,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.product_id,
            seller_id: value.seller_id,
            category_id: value.category_id,
            name: value.name,
            description: value.description,
            price: value.price,
            currency: value.currency,
            moq: value.moq,
            quantity: value.quantity,
            status: value.status,
            rejection_reason: value.rejection_reason,
            is_verified: value.is_verified,
            is_active: value.is_active,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
