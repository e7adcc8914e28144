use crate::domain::ProductStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub category_id: Option<i32>,

    #[serde(default)]
    pub status: Option<ProductStatus>,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            category_id: None,
            status: None,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

pub(crate) fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency")
            .with_message("Currency must be a 3-letter uppercase code".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category_id: Option<i32>,

    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,

    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,

    #[validate(range(min = 1, message = "MOQ must be at least 1"))]
    pub moq: i32,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}

pub type UpdateProductRequest = CreateProductRequest;

/// Row to insert or replace, owned by `seller_id`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub moq: i32,
    pub quantity: i32,
}

impl NewProduct {
    pub fn from_request(seller_id: i32, req: &CreateProductRequest) -> Self {
        Self {
            seller_id,
            category_id: req.category_id,
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            price: req.price,
            currency: req.currency.clone(),
            moq: req.moq,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewProductRequest {
    pub decision: ProductDecision,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CreateProductRequest {
        CreateProductRequest {
            name: "Marine diesel filter".into(),
            description: None,
            category_id: Some(1),
            price: 120.5,
            currency: "USD".into(),
            moq: 10,
            quantity: 500,
        }
    }

    #[test]
    fn accepts_a_valid_product() {
        assert!(product().validate().is_ok());
    }

    #[test]
    fn rejects_zero_price_and_moq() {
        let mut req = product();
        req.price = 0.0;
        req.moq = 0;
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("moq"));
    }

    #[test]
    fn currency_must_be_iso_like() {
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("eur").is_err());
        assert!(validate_currency("EURO").is_err());
    }
}
