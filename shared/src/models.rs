//! Data models for the hotel management application

use crate::errors::ParseError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a staff member
///
/// Serialized lowercase; decoded through [`FromStr`], so input is
/// case-insensitive and may carry surrounding whitespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WorkType {
    Chef,
    Waiter,
    Manager,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Chef => "chef",
            WorkType::Waiter => "waiter",
            WorkType::Manager => "manager",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chef" => Ok(WorkType::Chef),
            "waiter" => Ok(WorkType::Waiter),
            "manager" => Ok(WorkType::Manager),
            _ => Err(ParseError::WorkType(s.to_string())),
        }
    }
}

/// Flavour profile of a menu item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Taste {
    Sweet,
    Spicy,
    Sour,
}

impl Taste {
    pub fn as_str(&self) -> &'static str {
        match self {
            Taste::Sweet => "sweet",
            Taste::Spicy => "spicy",
            Taste::Sour => "sour",
        }
    }
}

impl fmt::Display for Taste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Taste {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sweet" => Ok(Taste::Sweet),
            "spicy" => Ok(Taste::Spicy),
            "sour" => Ok(Taste::Sour),
            _ => Err(ParseError::Taste(s.to_string())),
        }
    }
}

impl TryFrom<String> for WorkType {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Taste {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Staff member as returned by the API
///
/// Carries no password material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub work: Option<WorkType>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub salary: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dish or drink on the hotel menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub taste: Taste,
    pub is_drink: bool,
    pub ingredients: Vec<String>,
    pub num_sales: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
