//! Append one more cycle to each curve.
//!
//! The keys after the first are repeated one span later, where the span runs from the
//! first to the last key. Values are offset by `last - first` so the repeat starts
//! where the curve ends: a walk keeps travelling forward, a sway returns to its pose.

use log::{debug, info, warn};

use crate::data::Key;
use crate::error::CurveError;
use crate::host::{selected_curves, CurveSource, SceneQuery, UndoHost};
use crate::ids::CurveHandle;
use crate::report::{CurveFailure, EditReport};
use crate::undo::undoable;

/// Keys that extend `keys` by one cycle. Empty for curves with fewer than two keys.
pub fn next_cycle(keys: &[Key]) -> Vec<Key> {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return Vec::new();
    };
    let span = last.time - first.time;
    if keys.len() < 2 || span <= 0.0 {
        return Vec::new();
    }
    let delta = last.value - first.value;
    keys[1..]
        .iter()
        .map(|k| Key::new(k.time + span, k.value + delta))
        .collect()
}

/// Loop every curve in `curves` once; `edited` counts the keys added.
pub fn loop_curves<S: CurveSource + ?Sized>(source: &mut S, curves: &[CurveHandle]) -> EditReport {
    let mut report = EditReport::default();
    for curve in curves {
        report.curves += 1;
        match loop_curve(source, curve) {
            Ok(n) => {
                debug!("{curve}: appended {n} keys");
                report.edited += n;
            }
            Err(failure) => {
                warn!(
                    "{}: loop stopped after {} keys: {}",
                    failure.curve, failure.completed, failure.error
                );
                report.edited += failure.completed;
                report.failures.push(failure);
            }
        }
    }
    report
}

fn loop_curve<S: CurveSource + ?Sized>(
    source: &mut S,
    curve: &CurveHandle,
) -> Result<usize, CurveFailure> {
    let keys = source.query_keys(curve).map_err(|error| CurveFailure {
        curve: curve.clone(),
        completed: 0,
        error,
    })?;
    let mut added = 0;
    for key in next_cycle(&keys) {
        source
            .set_key(curve, key.time, key.value)
            .map_err(|error| CurveFailure {
                curve: curve.clone(),
                completed: added,
                error,
            })?;
        added += 1;
    }
    Ok(added)
}

/// Loop all curves connected to the current selection as one undoable edit.
pub fn loop_selection<S>(scene: &mut S) -> Result<EditReport, CurveError>
where
    S: CurveSource + SceneQuery + UndoHost + ?Sized,
{
    undoable(scene, |scene| -> Result<EditReport, CurveError> {
        let (selection, curves) = selected_curves(&*scene)?;
        let report = loop_curves(scene, &curves);
        info!(
            "{} keys appended on {} objects",
            report.edited,
            selection.len()
        );
        Ok(report)
    })
}
