//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Stamp creation times and convert entities to DTOs.
//! - Emit one log event per operation with outcome and duration.
//!
//! # Invariants
//! - Services hold no entity state between calls; the store is the only
//!   source of truth.
//! - No operation is retried internally.

use crate::error::{Classify, ErrorKind};
use chrono::Utc;
use log::{debug, error, warn};
use std::fmt::Display;
use std::time::Instant;

pub mod tool_service;
pub mod user_service;

/// Current time as Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Runs one service operation and logs its outcome.
///
/// Client faults are logged at `warn`, store failures at `error`.
pub(crate) fn observe<T, E>(event: &'static str, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
where
    E: Classify + Display,
{
    let started_at = Instant::now();
    let result = op();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => debug!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err) => match err.kind() {
            ErrorKind::Internal => error!(
                "event={event} module=service status=error error_kind={} duration_ms={duration_ms} error={err}",
                ErrorKind::Internal.as_str()
            ),
            kind => warn!(
                "event={event} module=service status=rejected error_kind={} duration_ms={duration_ms}",
                kind.as_str()
            ),
        },
    }

    result
}
