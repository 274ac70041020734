//! JWT token issuance and validation
//!
//! Tokens are stateless: the signed payload carries the staff member's id
//! and username plus an expiry, and nothing is stored server-side.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Identity embedded in a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub id: Uuid,
    pub username: String,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff record id
    pub id: Uuid,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Token verification failure
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Built once at startup from the configured secret and shared through
/// `AppState`.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    ttl: Duration,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Refuses an empty secret and a lifetime that is not a positive,
    /// representable number of seconds.
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Result<Self> {
        if secret.expose_secret().is_empty() {
            anyhow::bail!("JWT signing secret must not be empty");
        }
        if ttl_secs <= 0 {
            anyhow::bail!("Token lifetime must be positive, got {} seconds", ttl_secs);
        }
        let ttl = Duration::try_seconds(ttl_secs)
            .with_context(|| format!("Token lifetime of {} seconds is out of range", ttl_secs))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            keys: JwtKeys::new(secret),
            ttl,
            validation: Arc::new(validation),
        })
    }

    /// Issue a token for an identity using the configured TTL
    #[inline]
    pub fn issue(&self, identity: &TokenIdentity) -> Result<String> {
        self.issue_with_ttl(identity, self.ttl)
    }

    /// Issue a token with an explicit TTL
    pub fn issue_with_ttl(&self, identity: &TokenIdentity, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token and return its claims
    ///
    /// A token whose expiry is at or before the current second is expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            },
        )?;

        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
