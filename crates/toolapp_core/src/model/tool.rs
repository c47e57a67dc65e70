//! Tool domain model.
//!
//! # Invariants
//! - `tool_name` and `tool_type` are non-blank.
//! - `user_id` is mandatory and resolved against `users` on every write.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned tool identifier.
pub type ToolId = i64;

/// Persisted tool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub tool_id: ToolId,
    pub tool_name: String,
    pub tool_type: String,
    /// Owning user. Never dangling once persisted.
    pub user_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Tool attributes ready for insertion. The store assigns `tool_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    pub tool_name: String,
    pub tool_type: String,
    pub user_id: UserId,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolValidationError {
    #[error("tool name must not be blank")]
    BlankName,
    #[error("tool type must not be blank")]
    BlankType,
}

impl Tool {
    pub fn validate(&self) -> Result<(), ToolValidationError> {
        validate_attributes(&self.tool_name, &self.tool_type)
    }
}

impl NewTool {
    pub fn validate(&self) -> Result<(), ToolValidationError> {
        validate_attributes(&self.tool_name, &self.tool_type)
    }
}

fn validate_attributes(tool_name: &str, tool_type: &str) -> Result<(), ToolValidationError> {
    if tool_name.trim().is_empty() {
        return Err(ToolValidationError::BlankName);
    }
    if tool_type.trim().is_empty() {
        return Err(ToolValidationError::BlankType);
    }
    Ok(())
}
