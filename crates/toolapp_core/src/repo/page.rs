//! Pagination and sorting contracts shared by repositories and services.
//!
//! # Responsibility
//! - Carry validated page requests from callers into SQL `LIMIT/OFFSET`.
//! - Compute page metadata (`total_pages`, `last`) from a total count.
//! - Whitelist sortable attributes per resource.
//!
//! # Invariants
//! - Page numbers are zero-indexed.
//! - Page size is at least 1; `PageRequest` cannot be built otherwise.
//! - Sort columns always come from a whitelist enum, never from caller text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Default zero-indexed page used by boundary callers.
pub const DEFAULT_PAGE: u32 = 0;
/// Default page size used by boundary callers.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest row offset SQLite accepts in `OFFSET`.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Rejected page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageRequest {
    #[error("page size must be at least 1")]
    ZeroSize,
    #[error("page {page} with size {size} starts past the largest supported offset")]
    OffsetOverflow { page: u32, size: u32 },
}

/// Rejected sort attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort field `{field}`; expected one of {expected}")]
pub struct UnknownSortField {
    pub field: String,
    pub expected: &'static str,
}

/// Validated zero-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Builds a request, rejecting `size == 0` and offsets beyond `i64::MAX`.
    pub fn new(page: u32, size: u32) -> Result<Self, InvalidPageRequest> {
        if size == 0 {
            return Err(InvalidPageRequest::ZeroSize);
        }
        if u64::from(page) * u64::from(size) > MAX_OFFSET {
            return Err(InvalidPageRequest::OffsetOverflow { page, size });
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One bounded slice of an ordered result set plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-indexed page number.
    pub page: u32,
    /// Requested page size (not the content length).
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    /// `true` when no page follows this one, including empty results.
    pub last: bool,
}

impl<T> Page<T> {
    /// Builds page metadata from the request and the unpaged total count.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
            last: u64::from(request.page()) + 1 >= total_pages,
        }
    }

    /// Maps content while preserving page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }
}

/// Sortable user attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    UserId,
    Name,
    Email,
    DateOfBirth,
    CreatedAt,
}

impl UserSortField {
    const EXPECTED: &'static str = "userId|name|email|dateOfBirth|createdAt";

    /// External attribute name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::Name => "name",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
            Self::CreatedAt => "createdAt",
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::Name => "name",
            Self::Email => "email",
            Self::DateOfBirth => "date_of_birth",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for UserSortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "userId" | "user_id" => Ok(Self::UserId),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "dateOfBirth" | "date_of_birth" => Ok(Self::DateOfBirth),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            other => Err(UnknownSortField {
                field: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl Display for UserSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sortable tool attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolSortField {
    #[default]
    ToolId,
    ToolName,
    ToolType,
    UserId,
    CreatedAt,
}

impl ToolSortField {
    const EXPECTED: &'static str = "toolId|toolName|toolType|userId|createdAt";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToolId => "toolId",
            Self::ToolName => "toolName",
            Self::ToolType => "toolType",
            Self::UserId => "userId",
            Self::CreatedAt => "createdAt",
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::ToolId => "tool_id",
            Self::ToolName => "tool_name",
            Self::ToolType => "tool_type",
            Self::UserId => "user_id",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for ToolSortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "toolId" | "tool_id" => Ok(Self::ToolId),
            "toolName" | "tool_name" => Ok(Self::ToolName),
            "toolType" | "tool_type" => Ok(Self::ToolType),
            "userId" | "user_id" => Ok(Self::UserId),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            other => Err(UnknownSortField {
                field: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl Display for ToolSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
