use crate::domain::RoleCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// Email address or username.
    #[validate(length(min = 3, message = "Email or username is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[validate(length(min = 2, message = "Full name must be at least 2 characters"))]
    pub full_name: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default = "default_register_role")]
    pub role: RoleCode,
}

/// Login treats any identifier containing `@` as an email.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.contains('@') {
        Err(ValidationError::new("username")
            .with_message("Username cannot contain '@'".into()))
    } else {
        Ok(())
    }
}

fn default_register_role() -> RoleCode {
    RoleCode::Buyer
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterRequest {
        RegisterRequest {
            email: "nadia@port.example".into(),
            username: "nadia".into(),
            password: "secret-pass".into(),
            confirm_password: "secret-pass".into(),
            full_name: "Nadia Haddad".into(),
            company_name: None,
            phone: None,
            role: RoleCode::Buyer,
        }
    }

    #[test]
    fn accepts_a_complete_registration() {
        assert!(register().validate().is_ok());
    }

    #[test]
    fn rejects_mismatched_passwords() {
        let mut req = register();
        req.confirm_password = "other-pass".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn rejects_bad_email_and_short_password() {
        let mut req = register();
        req.email = "not-an-email".into();
        req.password = "short".into();
        req.confirm_password = "short".into();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn rejects_usernames_that_look_like_emails() {
        let mut req = register();
        req.username = "nadia@port.example".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn role_defaults_to_buyer() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.co",
            "username": "abc",
            "password": "12345678",
            "confirm_password": "12345678",
            "full_name": "A B"
        }))
        .unwrap();
        assert_eq!(req.role, RoleCode::Buyer);
    }
}
