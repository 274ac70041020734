//! Hotel Management Shared Library
//!
//! This crate contains the wire models, request/response types and input
//! validation rules shared by the backend and any client.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{MenuItem, Person, Taste, WorkType};
pub use types::*;
