//! Batch results returned to callers instead of console output.

use serde::{Deserialize, Serialize};

use crate::error::HostCommandError;
use crate::ids::CurveHandle;

/// A curve whose processing stopped on a host error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveFailure {
    pub curve: CurveHandle,
    /// Keys already removed/edited on this curve before the failure (they stay applied).
    pub completed: usize,
    pub error: HostCommandError,
}

/// Outcome of a key reduction batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReduceReport {
    /// Keys successfully removed across all curves.
    pub removed: usize,
    /// Curves visited, including failed ones.
    pub curves: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CurveFailure>,
}

/// Outcome of a batch that edits keys in place (rounding, offsets).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditReport {
    /// Keys (rounding) or curves (offsets) successfully edited.
    pub edited: usize,
    pub curves: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CurveFailure>,
}

impl ReduceReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl EditReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn merge(&mut self, other: EditReport) {
        self.edited += other.edited;
        self.curves += other.curves;
        self.failures.extend(other.failures);
    }
}
