//! Data stores
//!
//! The services talk to storage only through the [`PersonStore`] and
//! [`MenuStore`] traits. PostgreSQL implementations back the server; the
//! in-memory implementations back tests and `memory://` deployments.

pub mod memory;
pub mod menu;
pub mod person;

use async_trait::async_trait;
use hotel_shared::models::{MenuItem, Taste, WorkType};
use thiserror::Error;
use uuid::Uuid;

pub use memory::{MemoryMenuStore, MemoryPersonStore};
pub use menu::{MenuChanges, NewMenuItem, PgMenuStore};
pub use person::{NewPerson, PersonChanges, PersonProfile, PersonRecord, PgPersonStore};

/// Store-level failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate value for unique field {field}")]
    Duplicate { field: &'static str },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("email") => "email",
                    Some(c) if c.contains("username") => "username",
                    _ => "value",
                };
                return StoreError::Duplicate { field };
            }
        }
        StoreError::Backend(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted staff records
///
/// `username` and `email` are unique; a conflicting insert or update fails
/// with [`StoreError::Duplicate`] and leaves the store unchanged. The store
/// never hashes anything: callers hand it finished password hashes.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn insert(&self, person: NewPerson) -> StoreResult<PersonRecord>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<PersonRecord>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<PersonRecord>>;

    /// All records in creation order, optionally restricted to one work type
    async fn find_all(&self, work: Option<WorkType>) -> StoreResult<Vec<PersonRecord>>;

    /// Apply a partial update; `Ok(None)` when no record has this id
    async fn update(&self, id: Uuid, changes: PersonChanges) -> StoreResult<Option<PersonRecord>>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

/// Persisted menu items
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn insert(&self, item: NewMenuItem) -> StoreResult<MenuItem>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<MenuItem>>;

    async fn find_all(&self, taste: Option<Taste>) -> StoreResult<Vec<MenuItem>>;

    async fn update(&self, id: Uuid, changes: MenuChanges) -> StoreResult<Option<MenuItem>>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
