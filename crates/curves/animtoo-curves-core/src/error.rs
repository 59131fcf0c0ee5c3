//! Error types for curve tools and host adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a host command (query, delete, edit, selection lookup).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{command} on '{target}' failed: {reason}")]
pub struct HostCommandError {
    /// Host command name, e.g. `queryKeys` or `deleteKey`.
    pub command: String,
    /// Curve or object the command was addressed to.
    pub target: String,
    pub reason: String,
}

impl HostCommandError {
    pub fn new(
        command: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the curve tools before or outside per-curve processing.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CurveError {
    #[error("tolerance must be finite and > 0, got {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("invalid offset range: {reason}")]
    InvalidOffsetRange { reason: String },

    #[error("curve '{curve}' is malformed: {reason}")]
    InvalidCurve { curve: String, reason: String },

    #[error("scene parse error: {0}")]
    Parse(String),

    #[error("serialize scene: {0}")]
    Serialize(String),

    #[error(transparent)]
    Host(#[from] HostCommandError),
}
