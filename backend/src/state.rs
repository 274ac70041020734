//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards:
//! the signing keys, the password hasher's work factor and the stores.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::db;
use crate::repositories::{
    MemoryMenuStore, MemoryPersonStore, MenuStore, PersonStore, PgMenuStore, PgPersonStore,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Shared application state
///
/// All fields are cheap to clone (`Arc` or `Arc`-backed).
#[derive(Clone)]
pub struct AppState {
    /// Staff records and credentials
    pub people: Arc<dyn PersonStore>,
    /// Menu items
    pub menu: Arc<dyn MenuStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuer/verifier with pre-computed keys
    pub jwt: JwtService,
    /// Password hasher with the configured work factor
    pub passwords: PasswordService,
}

impl AppState {
    /// Assemble state around already-constructed stores
    ///
    /// Fails if the signing secret is missing or the work factor is invalid.
    pub fn new(
        config: AppConfig,
        people: Arc<dyn PersonStore>,
        menu: Arc<dyn MenuStore>,
    ) -> Result<Self> {
        let secret = config.jwt_secret()?;
        let jwt = JwtService::new(&secret, config.jwt.token_ttl_secs)?;
        let passwords = PasswordService::new(&config.password)?;

        Ok(Self {
            people,
            menu,
            config: Arc::new(config),
            jwt,
            passwords,
        })
    }

    /// State backed by the in-process stores
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Self::new(
            config,
            Arc::new(MemoryPersonStore::new()),
            Arc::new(MemoryMenuStore::new()),
        )
    }

    /// Build state from configuration, connecting to the database if needed
    pub async fn connect(config: AppConfig) -> Result<Self> {
        // Resolve the secret before touching the database so a bad
        // deployment fails immediately.
        config.jwt_secret()?;

        if config.uses_memory_store() {
            info!("Using in-memory stores");
            return Self::in_memory(config);
        }

        info!("Connecting to database...");
        let pool = db::create_pool(&config.database).await?;

        // Skip in production if using a separate migration job
        if !AppConfig::is_production() {
            db::run_migrations(&pool).await?;
        }

        Self::new(
            config,
            Arc::new(PgPersonStore::new(pool.clone())),
            Arc::new(PgMenuStore::new(pool)),
        )
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the password hasher
    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
