use crate::{domain::RoleCode, utils::random_string::random_from};
use anyhow::Result;
use chrono::{Datelike, Utc};

const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `{PREFIX}-{YY}-{XXXXXX}`, e.g. `SELL-25-AB12CD`.
pub fn generate_vendor_code(role: RoleCode) -> Result<String> {
    let year = Utc::now().year() % 100;
    let suffix = random_from(UPPER_ALPHANUMERIC, 6)?;

    Ok(format!("{}-{year:02}-{suffix}", role.vendor_prefix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_has_prefix_year_and_suffix() {
        let code = generate_vendor_code(RoleCode::Seller).unwrap();
        let parts: Vec<&str> = code.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SELL");
        assert_eq!(parts[1], format!("{:02}", Utc::now().year() % 100));
        assert_eq!(parts[2].len(), 6);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn every_role_gets_its_prefix() {
        for (role, prefix) in [
            (RoleCode::Buyer, "BUY-"),
            (RoleCode::Seller, "SELL-"),
            (RoleCode::Captain, "CAP-"),
            (RoleCode::Hr, "HR-"),
            (RoleCode::Admin, "ADM-"),
        ] {
            assert!(generate_vendor_code(role).unwrap().starts_with(prefix));
        }
    }
}
