//! Password hashing using argon2
//!
//! Provides salted one-way hashing and verification with a tunable work
//! factor.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the
//! `*_async` variants, which run on the blocking thread pool.

use crate::config::PasswordConfig;
use anyhow::Result;
use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;
use tracing::warn;

/// Password hashing service
///
/// Uses Argon2id with the configured memory/iteration/lane costs. Each call
/// to [`PasswordService::hash`] draws a fresh salt, and the PHC string it
/// returns embeds both the salt and the parameters, so verification always
/// uses the cost the hash was created with.
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
    /// Hash at the configured cost that no real password is checked against
    dummy_hash: Arc<str>,
}

impl PasswordService {
    /// Build a hasher for the given work factor
    pub fn new(config: &PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid password hashing parameters: {}", e))?;

        let mut service = Self {
            params,
            dummy_hash: Arc::from(""),
        };
        service.dummy_hash = Arc::from(service.hash("unused-login-placeholder")?);
        Ok(service)
    }

    /// Hash to verify against when the account does not exist
    ///
    /// Costs the same to check as a stored hash, so a login for an unknown
    /// username takes as long as one with a wrong password.
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password using argon2 (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// A malformed hash verifies as `false`. Only a failure of the primitive
    /// itself is an error.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash is malformed: {}", e);
                return Ok(false);
            }
        };
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(HashError::Crypto) => Err(anyhow::anyhow!("Password verification primitive failed")),
            Err(e) => {
                warn!("Stored password hash is unusable: {}", e);
                Ok(false)
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(&self, password: String, hash: String) -> Result<bool> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
