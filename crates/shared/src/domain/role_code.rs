use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Codes of the seeded rows in the `roles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleCode {
    Buyer,
    Seller,
    Captain,
    Hr,
    Admin,
}

impl RoleCode {
    pub const ALL: [RoleCode; 5] = [
        RoleCode::Buyer,
        RoleCode::Seller,
        RoleCode::Captain,
        RoleCode::Hr,
        RoleCode::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCode::Buyer => "buyer",
            RoleCode::Seller => "seller",
            RoleCode::Captain => "captain",
            RoleCode::Hr => "hr",
            RoleCode::Admin => "admin",
        }
    }

    pub fn vendor_prefix(&self) -> &'static str {
        match self {
            RoleCode::Buyer => "BUY",
            RoleCode::Seller => "SELL",
            RoleCode::Captain => "CAP",
            RoleCode::Hr => "HR",
            RoleCode::Admin => "ADM",
        }
    }

    /// Roles a visitor may pick on the public register form.
    pub fn is_self_service(&self) -> bool {
        matches!(self, RoleCode::Buyer | RoleCode::Seller)
    }

    /// Internal accounts created through HR.
    pub fn is_staff(&self) -> bool {
        matches!(self, RoleCode::Captain | RoleCode::Hr)
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(RoleCode::Buyer),
            "seller" => Ok(RoleCode::Seller),
            "captain" => Ok(RoleCode::Captain),
            "hr" => Ok(RoleCode::Hr),
            "admin" => Ok(RoleCode::Admin),
            other => Err(format!("Unknown role code: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SELLER".parse::<RoleCode>().unwrap(), RoleCode::Seller);
        assert_eq!(" hr ".parse::<RoleCode>().unwrap(), RoleCode::Hr);
        assert!("pilot".parse::<RoleCode>().is_err());
    }

    #[test]
    fn every_code_round_trips_through_as_str() {
        for code in RoleCode::ALL {
            assert_eq!(code.as_str().parse::<RoleCode>().unwrap(), code);
        }
    }

    #[test]
    fn only_buyers_and_sellers_self_register() {
        let open: Vec<_> = RoleCode::ALL
            .into_iter()
            .filter(RoleCode::is_self_service)
            .collect();
        assert_eq!(open, vec![RoleCode::Buyer, RoleCode::Seller]);
    }
}
