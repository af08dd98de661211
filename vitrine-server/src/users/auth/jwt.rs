//! HS256 access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

pub fn generate_access_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_secs);

    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn validate_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_and_round_trip_claims() {
        let user_id = Uuid::new_v4();
        let token = generate_access_token(
            user_id,
            "ada@example.org",
            "test-secret",
            900,
        )
        .unwrap();

        let claims = validate_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ada@example.org");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(
            Uuid::new_v4(),
            "ada@example.org",
            "test-secret",
            900,
        )
        .unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = generate_access_token(
            Uuid::new_v4(),
            "ada@example.org",
            "test-secret",
            -3600,
        )
        .unwrap();
        assert!(validate_token(&token, "test-secret").is_err());
    }
}
