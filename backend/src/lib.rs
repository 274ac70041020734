//! Hotel Backend Library
//!
//! Staff accounts, credential checks and bearer tokens for the hotel
//! management API, plus the menu catalogue. Exposed as a library so the
//! integration tests can build the router directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
