use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Submitted,
    Approved,
    Rejected,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Submitted,
        ProductStatus::Approved,
        ProductStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Submitted => "submitted",
            ProductStatus::Approved => "approved",
            ProductStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ProductStatus::Submitted),
            "approved" => Ok(ProductStatus::Approved),
            "rejected" => Ok(ProductStatus::Rejected),
            other => Err(format!("Unknown product status: {other}")),
        }
    }
}
