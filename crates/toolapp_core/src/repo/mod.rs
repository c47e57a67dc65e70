//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for users and tools.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce entity `validate()` before persistence.
//! - Misses are values (`None`/`false`); only owner resolution failures and
//!   storage failures are errors.

pub mod page;
mod schema;
pub mod tool_repo;
pub mod user_repo;
