use crate::domain::RfqStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllRfqs {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub status: Option<RfqStatus>,
}

impl Default for FindAllRfqs {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            status: None,
        }
    }
}

/// Whose RFQs a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfqScope {
    Buyer(i32),
    Seller(i32),
    All,
}

impl RfqScope {
    pub fn buyer_id(&self) -> Option<i32> {
        match self {
            RfqScope::Buyer(id) => Some(*id),
            _ => None,
        }
    }

    pub fn seller_id(&self) -> Option<i32> {
        match self {
            RfqScope::Seller(id) => Some(*id),
            _ => None,
        }
    }
}

fn check_budget(min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("budget")
            .with_message("budget_min cannot exceed budget_max".into())),
        _ => Ok(()),
    }
}

fn validate_budget(req: &CreateRfqRequest) -> Result<(), ValidationError> {
    check_budget(req.budget_min, req.budget_max)
}

fn validate_edit_budget(req: &UpdateRfqRequest) -> Result<(), ValidationError> {
    check_budget(req.budget_min, req.budget_max)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_budget"))]
pub struct CreateRfqRequest {
    pub product_id: i32,

    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_min: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_max: Option<f64>,

    #[serde(default)]
    pub response_deadline: Option<NaiveDate>,
}

/// Buyer edit of an existing RFQ. The product cannot change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_edit_budget"))]
pub struct UpdateRfqRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_min: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget_max: Option<f64>,

    #[serde(default)]
    pub response_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewRfq {
    pub buyer_id: i32,
    pub product_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub response_deadline: Option<NaiveDate>,
}

impl NewRfq {
    pub fn from_request(buyer_id: i32, req: &CreateRfqRequest) -> Self {
        Self {
            buyer_id,
            product_id: req.product_id,
            title: req.title.trim().to_string(),
            description: req.description.clone(),
            quantity: req.quantity,
            budget_min: req.budget_min,
            budget_max: req.budget_max,
            response_deadline: req.response_deadline,
        }
    }

    pub fn from_edit(buyer_id: i32, product_id: i32, req: &UpdateRfqRequest) -> Self {
        Self {
            buyer_id,
            product_id,
            title: req.title.trim().to_string(),
            description: req.description.clone(),
            quantity: req.quantity,
            budget_min: req.budget_min,
            budget_max: req.budget_max,
            response_deadline: req.response_deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRfqStatusRequest {
    pub status: RfqStatus,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Quoted price cannot be negative"))]
    pub quoted_price: Option<f64>,

    #[serde(default)]
    #[validate(length(min = 1, max = 500))]
    pub doq_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfq() -> CreateRfqRequest {
        CreateRfqRequest {
            product_id: 3,
            title: "Bunker fuel for MV Atlas".into(),
            description: Some("Delivery at berth 4".into()),
            quantity: 200,
            budget_min: Some(1000.0),
            budget_max: Some(5000.0),
            response_deadline: None,
        }
    }

    #[test]
    fn accepts_a_valid_rfq() {
        assert!(rfq().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_budget_range() {
        let mut req = rfq();
        req.budget_min = Some(9000.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut req = rfq();
        req.quantity = 0;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn edits_check_the_budget_range_and_ignore_product_id() {
        let edit: UpdateRfqRequest = serde_json::from_value(serde_json::json!({
            "product_id": 99,
            "title": "Bunker fuel, revised",
            "quantity": 150,
            "budget_min": 6000.0,
            "budget_max": 5000.0
        }))
        .unwrap();
        assert!(edit.validate().is_err());

        let fixed = UpdateRfqRequest {
            budget_min: Some(4000.0),
            ..edit
        };
        assert!(fixed.validate().is_ok());
        assert_eq!(NewRfq::from_edit(1, 3, &fixed).product_id, 3);
    }

    #[test]
    fn open_ended_budget_is_fine() {
        let mut req = rfq();
        req.budget_min = None;
        assert!(req.validate().is_ok());
    }
}
