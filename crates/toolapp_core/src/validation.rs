//! Boundary-side input validation.
//!
//! # Responsibility
//! - Reject malformed user/tool payloads before they reach a service.
//! - Guard date-of-birth range queries (ordering, no future dates).
//!
//! # Invariants
//! - Checks run in field declaration order and stop at the first failure.
//! - Services never call into this module; they rely on entity validation
//!   in the repositories as the last line.

use crate::mapping::dto::{ToolDto, UserDto};
use crate::repo::user_repo::DATE_FORMAT;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*@.*$").expect("valid email regex"));
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// First failing field of a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_user_dto(dto: &UserDto) -> Result<(), ValidationError> {
    if dto.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name can not be null or empty"));
    }
    if dto.email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email can not be null or empty"));
    }
    if !EMAIL_RE.is_match(&dto.email) {
        return Err(ValidationError::new("email", "Value must contain '@'"));
    }
    Ok(())
}

pub fn validate_tool_dto(dto: &ToolDto) -> Result<(), ValidationError> {
    if dto.tool_name.trim().is_empty() {
        return Err(ValidationError::new(
            "toolName",
            "Tool name cannot be null or empty",
        ));
    }
    if dto.tool_type.trim().is_empty() {
        return Err(ValidationError::new(
            "toolType",
            "Tool type cannot be null or empty",
        ));
    }
    Ok(())
}

/// Guards a date-of-birth range query.
///
/// `today` is passed in so callers decide the reference time zone.
pub fn validate_dob_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::new(
            "startDate",
            "Start date must be before end date",
        ));
    }
    if start > today || end > today {
        return Err(ValidationError::new(
            "endDate",
            "Dates cannot be in the future",
        ));
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(ValidationError::new(
            field,
            "Date must not be null and in format: yyyy-mm-dd",
        ));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::new(field, format!("Invalid calendar date `{trimmed}`")))
}

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
