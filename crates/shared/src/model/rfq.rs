use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rfq {
    pub rfq_id: i32,
    pub buyer_id: i32,
    pub product_id: i32,
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
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// An RFQ joined with the seller owning its product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RfqWithSeller {
    #[sqlx(flatten)]
    pub rfq: Rfq,
    pub seller_id: i32,
    pub product_name: String,
}
