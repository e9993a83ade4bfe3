//! Error types surfaced by the scheduling engine.
//!
//! Invariant violations and configuration errors are modeled as
//! [`MhError`] and propagated with `?`; acceptance-rule rejections and
//! ordinary termination are not errors (see [`crate::method::MethodResult`]).

use thiserror::Error;

/// Errors raised by the scheduler, drivers, and solution `check()` hooks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MhError {
    /// A solution's `check()` detected a broken invariant: cache/objective
    /// mismatch, duplicate or missing elements, capacity overflow, or an
    /// unsorted region that is required to be sorted.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A driver was constructed with an inconsistent configuration: an
    /// empty method list where at least one method is required, an unknown
    /// method name, or a compatibility matrix of the wrong shape.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl MhError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        MhError::InvariantViolation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        MhError::Configuration(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type MhResult<T> = Result<T, MhError>;
