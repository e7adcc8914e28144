use crate::model::{Rfq, RfqWithSeller};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RfqResponse {
    pub id: i32,
    pub buyer_id: i32,
    pub product_id: i32,
    pub seller_id: Option<i32>,
    pub product_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub response_deadline: Option<NaiveDate>,
    pub status: String,
    pub response_message: Option<String>,
    pub quoted_price: Option<f64>,
    pub doq_reference: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Rfq> for RfqResponse {
    fn from(value: Rfq) -> Self {
        RfqResponse {
            id: value.rfq_id,
            buyer_id: value.buyer_id,
            product_id: value.product_id,
            seller_id: None,
            product_name: None,
            title: value.title,
            description: value.description,
            quantity: value.quantity,
            budget_min: value.budget_min,
            budget_max: value.budget_max,
            response_deadline: value.response_deadline,
            status: value.status,
            response_message: value.response_message,
            quoted_price: value.quoted_price,
            doq_reference: value.doq_reference,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl From<RfqWithSeller> for RfqResponse {
    fn from(value: RfqWithSeller) -> Self {
        RfqResponse {
            seller_id: Some(value.seller_id),
            product_name: Some(value.product_name),
            ..RfqResponse::from(value.rfq)
        }
    }
}
