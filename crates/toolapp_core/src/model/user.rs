//! User domain model.
//!
//! # Responsibility
//! - Define the persisted user record and its insert shape.
//! - Validate user attributes before they reach storage.
//!
//! # Invariants
//! - `name` is non-blank.
//! - `email` is non-blank and contains `@`.
//! - `date_of_birth` falls in years 0000 through 9999.
//! - `user_id` and `created_at` never change after creation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned user identifier.
pub type UserId = i64;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// User attributes ready for insertion. The store assigns `user_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Entity-level user validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    #[error("user name must not be blank")]
    BlankName,
    #[error("user email must not be blank")]
    BlankEmail,
    #[error("user email must contain '@'")]
    EmailMissingAt,
    #[error("user date of birth year {0} is outside 0000-9999")]
    DateOfBirthOutOfRange(i32),
}

/// Years whose `%Y-%m-%d` text sorts in date order.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

impl User {
    /// Validates mutable attributes of a persisted record.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_attributes(&self.name, &self.email, self.date_of_birth)
    }
}

impl NewUser {
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_attributes(&self.name, &self.email, self.date_of_birth)
    }
}

fn validate_attributes(
    name: &str,
    email: &str,
    date_of_birth: NaiveDate,
) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::BlankName);
    }
    if email.trim().is_empty() {
        return Err(UserValidationError::BlankEmail);
    }
    if !email.contains('@') {
        return Err(UserValidationError::EmailMissingAt);
    }
    if !SUPPORTED_YEARS.contains(&date_of_birth.year()) {
        return Err(UserValidationError::DateOfBirthOutOfRange(
            date_of_birth.year(),
        ));
    }
    Ok(())
}
