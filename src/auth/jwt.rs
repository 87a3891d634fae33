//! JWT Token Handler
//! Mission: Issue and validate stateless, signed identity tokens

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

use crate::auth::models::{Claims, Role};
use crate::error::ApiError;

/// Issues and validates HS256 tokens. No server-side session record is
/// kept; validity is signature + expiry alone.
pub struct JwtHandler {
    secret: String,
    ttl: Duration,
}

impl JwtHandler {
    pub fn new(secret: String, ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a token for an account. Returns the token and its lifetime in
    /// seconds.
    pub fn issue(&self, account_id: Uuid, role: Role) -> Result<(String, usize)> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: account_id.to_string(),
            role,
            exp: expiration,
        };

        debug!(
            "Issuing token for account {} ({}), ttl {}m",
            account_id,
            role.as_str(),
            self.ttl.num_minutes()
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")?;

        Ok((token, self.ttl.num_seconds().max(0) as usize))
    }

    /// Validate a token and extract its claims. Every failure mode (bad
    /// signature, malformed payload, expired) collapses into the opaque
    /// `Unauthenticated` classification.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::Unauthenticated)?;

        debug!("Validated token for account {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
