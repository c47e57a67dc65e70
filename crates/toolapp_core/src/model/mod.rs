//! Domain model for users and the tools they own.
//!
//! # Responsibility
//! - Define canonical records used by core business logic.
//! - Provide entity-level validation shared by every write path.
//!
//! # Invariants
//! - Identities are assigned by the store and never reused.
//! - Every tool references exactly one owning user.
//! - `created_at` is written once at creation and never updated.

pub mod tool;
pub mod user;
