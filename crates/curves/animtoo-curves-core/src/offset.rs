//! Time offsets for the animation of selected objects.
//!
//! Offsets are whole frames for the randomized modes, matching how artists stagger
//! crowd or prop animation by hand. [`OffsetMode::KeepRange`] slides the motion inside
//! each curve's existing frame range instead of moving the range itself.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, HostCommandError};
use crate::host::{CurveSource, SceneQuery, UndoHost};
use crate::ids::CurveHandle;
use crate::report::{CurveFailure, EditReport};
use crate::undo::undoable;

/// How much each selected object is shifted in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum OffsetMode {
    /// Every object moves by the same amount.
    Fixed { offset: f64 },
    /// Every object's motion moves by `offset`, but each curve keeps its original
    /// first and last key times: keys are re-inserted at the old times and keys
    /// pushed outside the old range are cut.
    KeepRange { offset: f64 },
    /// Object n moves by object n-1's offset plus a random step in `[min, max]`.
    Progressive { min: i64, max: i64 },
    /// Each object moves by a random whole frame in `[0, max)`.
    Random { max: i64 },
}

impl OffsetMode {
    pub fn validate(&self) -> Result<(), CurveError> {
        match *self {
            OffsetMode::Fixed { offset } | OffsetMode::KeepRange { offset }
                if !offset.is_finite() =>
            {
                Err(CurveError::InvalidOffsetRange {
                    reason: format!("offset must be finite, got {offset}"),
                })
            }
            OffsetMode::Progressive { min, max } if min > max => {
                Err(CurveError::InvalidOffsetRange {
                    reason: format!("min {min} > max {max}"),
                })
            }
            OffsetMode::Random { max } if max <= 0 => Err(CurveError::InvalidOffsetRange {
                reason: format!("random max must be > 0, got {max}"),
            }),
            _ => Ok(()),
        }
    }

    /// One offset per object, in selection order.
    pub fn offsets(&self, count: usize, rng: &mut StdRng) -> Result<Vec<f64>, CurveError> {
        self.validate()?;
        let mut out = Vec::with_capacity(count);
        match *self {
            OffsetMode::Fixed { offset } | OffsetMode::KeepRange { offset } => {
                out.resize(count, offset)
            }
            OffsetMode::Progressive { min, max } => {
                let mut last = 0i64;
                for n in 0..count {
                    let step = rng.random_range(min..=max);
                    last = last
                        .checked_add(step)
                        .ok_or_else(|| CurveError::InvalidOffsetRange {
                            reason: format!(
                                "progressive offset overflows at object {n} (range [{min}, {max}])"
                            ),
                        })?;
                    out.push(last as f64);
                }
            }
            OffsetMode::Random { max } => {
                for _ in 0..count {
                    out.push(rng.random_range(0..max) as f64);
                }
            }
        }
        Ok(out)
    }

    #[inline]
    pub fn keeps_range(&self) -> bool {
        matches!(self, OffsetMode::KeepRange { .. })
    }
}

/// Shift every key of `curves` by `offset`.
pub fn offset_curves<S: CurveSource + ?Sized>(
    source: &mut S,
    curves: &[CurveHandle],
    offset: f64,
) -> EditReport {
    let mut report = EditReport::default();
    for curve in curves {
        report.curves += 1;
        match source.shift_keys(curve, offset) {
            Ok(()) => report.edited += 1,
            Err(error) => {
                warn!("{curve}: offset by {offset} failed: {error}");
                report.failures.push(CurveFailure {
                    curve: curve.clone(),
                    completed: 0,
                    error,
                });
            }
        }
    }
    report
}

/// Shift the motion of every curve in `curves` by `offset` while each curve keeps
/// its `[first, last]` key range.
pub fn offset_curves_in_range<S: CurveSource + ?Sized>(
    source: &mut S,
    curves: &[CurveHandle],
    offset: f64,
) -> EditReport {
    let mut report = EditReport::default();
    for curve in curves {
        report.curves += 1;
        match offset_in_range(source, curve, offset) {
            Ok(()) => report.edited += 1,
            Err(error) => {
                warn!("{curve}: range-locked offset by {offset} failed: {error}");
                report.failures.push(CurveFailure {
                    curve: curve.clone(),
                    completed: 0,
                    error,
                });
            }
        }
    }
    report
}

fn offset_in_range<S: CurveSource + ?Sized>(
    source: &mut S,
    curve: &CurveHandle,
    offset: f64,
) -> Result<(), HostCommandError> {
    let old = source.query_keys(curve)?;
    let (first, last) = match (old.first(), old.last()) {
        (Some(f), Some(l)) => (f.time, l.time),
        _ => return Ok(()),
    };
    source.shift_keys(curve, offset)?;
    for key in &old {
        source.insert_key(curve, key.time)?;
    }
    for key in source.query_keys(curve)? {
        if key.time < first || key.time > last {
            source.delete_key(curve, key.time)?;
        }
    }
    Ok(())
}

/// Offset the curves of each selected object, one offset per object, as one undoable edit.
pub fn offset_selection<S>(
    scene: &mut S,
    mode: &OffsetMode,
    rng: &mut StdRng,
) -> Result<EditReport, CurveError>
where
    S: CurveSource + SceneQuery + UndoHost + ?Sized,
{
    let selection = scene.list_selected_objects()?;
    let offsets = mode.offsets(selection.len(), rng)?;

    undoable(scene, |scene| -> Result<EditReport, CurveError> {
        let mut report = EditReport::default();
        for (obj, offset) in selection.iter().zip(offsets) {
            let curves = scene.list_connected_curves(obj)?;
            debug!("{obj}: offset {} curves by {offset}", curves.len());
            let edited = if mode.keeps_range() {
                offset_curves_in_range(scene, &curves, offset)
            } else {
                offset_curves(scene, &curves, offset)
            };
            report.merge(edited);
        }
        info!(
            "{} curves offset on {} objects",
            report.edited,
            selection.len()
        );
        Ok(report)
    })
}
