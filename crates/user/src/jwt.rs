use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,
    pub iat: usize,
    /// `token_version` of the user at issue time.
    pub ver: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub.parse().context("Invalid subject in JWT")
    }
}

/// HS256 token for `user_id`, valid for `expiration_days` or until the
/// user's token version moves past `version`.
pub fn generate_jwt(
    user_id: i64,
    version: i64,
    secret: &str,
    expiration_days: u64,
) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("Failed to get current time")?
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (expiration_days * 24 * 60 * 60) as usize,
        iat: now,
        ver: version,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT")
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT")?;

    Ok(token_data.claims)
}
