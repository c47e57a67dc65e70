//! Mapping layer between external representations and persisted entities.
//!
//! # Responsibility
//! - Define the externally visible DTO shapes.
//! - Convert between DTOs and entities by field copying only.
//!
//! # Invariants
//! - Mapping functions are pure: no validation, no I/O, no clock reads.

pub mod dto;
pub mod mapper;
