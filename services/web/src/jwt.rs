//! Session token signing and validation
//!
//! Tokens are HS256 JWTs carrying the user id and a random session id. The
//! session id is what the Redis session store is keyed on, so a token stays
//! usable only while its session key exists.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Session ID
    pub sid: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl JwtService {
    /// Initialize a new JWT service from a shared secret
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("session secret must not be empty");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        })
    }

    /// Issue a token for a new session of `user_id`
    pub fn generate_token(&self, user_id: i64) -> Result<(String, Claims)> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let exp = now
            .checked_add(self.ttl_seconds)
            .ok_or_else(|| anyhow::anyhow!("session ttl of {}s overflows", self.ttl_seconds))?;

        let claims = Claims {
            sub: user_id,
            sid: Uuid::new_v4(),
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok((token, claims))
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Session lifetime in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}
