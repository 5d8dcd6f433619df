//! Error types for generation and for driver runs.

use crate::config::ConfigError;
use thiserror::Error;

/// Why a generator could not produce a value.
///
/// Both variants are recoverable: the driver counts them as discards and
/// `chain` falls through to its next generator on either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A `such_that` predicate rejected the generated value.
    #[error("generated value did not satisfy the predicate")]
    Unsatisfied,
    /// A finite generator (`fixed`, `chain`) has nothing left to produce.
    #[error("generators exhausted: {0}")]
    Exhausted(&'static str),
}

/// Errors that abort a driver run before or while it reports.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract a printable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
