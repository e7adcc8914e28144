use crate::{abstract_trait::JwtServiceTrait, domain::RoleCode, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;
const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub role: RoleCode,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

#[derive(Clone)]
pub struct JwtConfig {
    jwt_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("jwt_secret", &"***").finish()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i32, role: RoleCode) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            role,
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(ACCESS_TOKEN_TTL_HOURS)).timestamp() as usize,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data =
            decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::Jwt(e),
                }
            })?;

        if token_data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_claims() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(42, RoleCode::Seller).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, RoleCode::Seller);
        assert_eq!(
            claims.exp - claims.iat,
            (ACCESS_TOKEN_TTL_HOURS * 3600) as usize
        );
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtConfig::new("one")
            .generate_token(1, RoleCode::Buyer)
            .unwrap();
        assert!(JwtConfig::new("two").verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let secret = "expiry-secret";
        let past = (Utc::now() - Duration::hours(48)).timestamp() as usize;
        let claims = Claims {
            user_id: 7,
            role: RoleCode::Buyer,
            iat: past,
            exp: past + 60,
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap();

        assert!(matches!(
            JwtConfig::new(secret).verify_token(&token),
            Err(ServiceError::TokenExpired)
        ));
    }
}
