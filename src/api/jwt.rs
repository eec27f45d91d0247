//! Identity verification
//!
//! The identity service is an external collaborator; the core only needs
//! `verify_token -> user id`. The shipped implementation validates HS256
//! JWTs whose `sub` claim carries the user id.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrimmrrError};

pub trait IdentityProvider: Send + Sync {
    /// Verify a bearer token and return the authenticated user id.
    fn verify_token(&self, token: &str) -> Result<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

pub struct JwtIdentityService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for a user id, valid for `ttl_secs` seconds.
    pub fn issue_token(&self, user_id: &str, ttl_secs: i64) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now().timestamp() + ttl_secs) as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TrimmrrError::unauthorized(format!("Token issuing failed: {}", e)))
    }
}

impl IdentityProvider for JwtIdentityService {
    fn verify_token(&self, token: &str) -> Result<String> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| TrimmrrError::unauthorized(format!("Invalid token: {}", e)))
    }
}
