//! Error types for the shared models

use thiserror::Error;

/// Raised when a string does not name a known enum variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid work type: {0}")]
    WorkType(String),

    #[error("Invalid taste: {0}")]
    Taste(String),
}
