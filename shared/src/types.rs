//! API request and response types

use crate::models::{MenuItem, Person, Taste, WorkType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Staff signup request
///
/// Only `username` and `password` are required; the profile fields may be
/// filled in later through an update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 4, max = 32, message = "Username must be 4-32 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 100, message = "Please enter a full name"))]
    pub name: Option<String>,
    #[validate(range(min = 18, max = 70, message = "Age must be between 18 and 70"))]
    pub age: Option<i32>,
    pub work: Option<WorkType>,
    pub mobile: Option<String>,
    #[validate(email(message = "Enter a valid email"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Address too long"))]
    pub address: Option<String>,
    pub salary: Option<Decimal>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token issued on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Result of a successful signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub response: Person,
    pub token: String,
}

/// Partial update of a staff record
///
/// Absent fields are left untouched. A present `password` is rehashed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[validate(length(min = 4, max = 32, message = "Username must be 4-32 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 2, max = 100, message = "Please enter a full name"))]
    pub name: Option<String>,
    #[validate(range(min = 18, max = 70, message = "Age must be between 18 and 70"))]
    pub age: Option<i32>,
    pub work: Option<WorkType>,
    pub mobile: Option<String>,
    #[validate(email(message = "Enter a valid email"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Address too long"))]
    pub address: Option<String>,
    pub salary: Option<Decimal>,
}

/// Query string for staff listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonQuery {
    pub work: Option<String>,
}

/// New menu item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub price: Decimal,
    pub taste: Taste,
    #[serde(default)]
    pub is_drink: bool,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Sales cannot be negative"))]
    pub num_sales: i32,
}

/// Partial update of a menu item
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub taste: Option<Taste>,
    pub is_drink: Option<bool>,
    pub ingredients: Option<Vec<String>>,
    #[validate(range(min = 0, message = "Sales cannot be negative"))]
    pub num_sales: Option<i32>,
}

/// Query string for menu listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    pub taste: Option<String>,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
