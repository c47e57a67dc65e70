//! Core domain logic for the tool registry.
//! Users own tools; this crate is the single source of truth for that
//! relationship and its integrity rules.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::CoreConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use error::{Classify, ErrorKind};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mapping::dto::{ToolDto, UserDto};
pub use model::tool::{NewTool, Tool, ToolId, ToolValidationError};
pub use model::user::{NewUser, User, UserId, UserValidationError};
pub use repo::page::{
    InvalidPageRequest, Page, PageRequest, ToolSortField, UnknownSortField, UserSortField,
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
pub use repo::tool_repo::{SqliteToolRepository, ToolRepository};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::tool_service::{ToolService, ToolServiceError, ToolServiceResult};
pub use service::user_service::{UserService, UserServiceError, UserServiceResult};
pub use validation::{
    local_today, parse_iso_date, validate_dob_range, validate_tool_dto, validate_user_dto,
    ValidationError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
