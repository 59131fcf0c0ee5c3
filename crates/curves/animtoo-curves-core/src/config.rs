//! Per-call configuration for the key reduction pass.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Tolerance defaults mirror the artist-facing tool.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Options for one reduction pass. Not persisted between invocations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Max. absolute difference for two key values to count as equal (strict `<`).
    pub tolerance: f64,
    /// Treat curves as stepped: a single matching neighbour is enough to drop a key.
    pub stepped: bool,
    /// Never remove the final key of a curve.
    #[serde(rename = "keepLast", alias = "keep_last")]
    pub keep_last: bool,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            stepped: false,
            keep_last: true,
        }
    }
}

impl ReduceConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn stepped(mut self, stepped: bool) -> Self {
        self.stepped = stepped;
        self
    }

    pub fn keep_last(mut self, keep_last: bool) -> Self {
        self.keep_last = keep_last;
        self
    }

    /// Reject tolerances that cannot describe a meaningful equality band.
    pub fn validate(&self) -> Result<(), CurveError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(CurveError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}
