//! Error classification for boundary callers.
//!
//! # Responsibility
//! - Map every core error onto the four client-visible categories.
//!
//! # Invariants
//! - `NotFound` is never produced by an error value: misses are returned as
//!   `None`/`false`, and boundaries use this category when they translate one.
//! - Storage failures always classify as `Internal`.

use crate::db::DbError;
use crate::repo::page::{InvalidPageRequest, UnknownSortField};
use crate::repo::user_repo::RepoError;
use crate::validation::ValidationError;
use serde::Serialize;

/// Client-visible error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Requested id/email has no matching record.
    NotFound,
    /// A tool referenced a user that does not exist.
    OwnerNotFound,
    /// Malformed input.
    Validation,
    /// Store failure or broken invariant.
    Internal,
}

impl ErrorKind {
    /// Stable lowercase label, used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::OwnerNotFound => "owner_not_found",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Whether the caller, not the server, is at fault.
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

/// Implemented by every error type the core returns.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

impl Classify for DbError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Internal
    }
}

impl Classify for RepoError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::UserValidation(_) | Self::ToolValidation(_) => ErrorKind::Validation,
            Self::OwnerNotFound(_) => ErrorKind::OwnerNotFound,
            Self::Db(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::InvalidData(_) => ErrorKind::Internal,
        }
    }
}

impl Classify for InvalidPageRequest {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl Classify for UnknownSortField {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl Classify for ValidationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
