//! Redundant key reduction.
//!
//! Model:
//! - A key is redundant when dropping it leaves the evaluated curve unchanged within tolerance.
//! - Smooth curves: the middle of three consecutive near-equal values is redundant.
//! - Stepped curves: any key whose value matches its predecessor is redundant.
//! - With `keep_last == false` the final key is dropped when it matches its predecessor.
//!
//! Decisions always read the original key sequence, never a partially reduced one, so a
//! flat run collapses to its two endpoints (smooth) or its first key (stepped) in one pass.

use log::{debug, info, warn};

use crate::config::ReduceConfig;
use crate::data::Key;
use crate::error::CurveError;
use crate::host::{selected_curves, CurveSource, SceneQuery, UndoHost};
use crate::ids::CurveHandle;
use crate::report::{CurveFailure, ReduceReport};
use crate::undo::undoable;

/// `|a - b| < tolerance`. Values exactly `tolerance` apart are not close.
#[inline]
pub fn is_close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Plan a reduction pass: the keys of `keys` that may be deleted, in time order.
///
/// Pure and infallible; a non-positive tolerance simply plans nothing.
pub fn redundant_keys(keys: &[Key], cfg: &ReduceConfig) -> Vec<Key> {
    let count = keys.len();
    if count < 2 {
        return Vec::new();
    }
    let close = |a: f64, b: f64| is_close(a, b, cfg.tolerance);

    let mut marked = vec![false; count];
    // keep_last: the last candidate is keys[count - 2]; otherwise keys[count - 1] as well.
    let scan_end = if cfg.keep_last { count - 2 } else { count - 1 };
    for i in 0..scan_end {
        let value = keys[i].value;
        let next = keys[i + 1].value;
        if cfg.stepped && close(value, next) {
            marked[i + 1] = true;
        } else if let Some(after) = keys.get(i + 2) {
            if close(value, next) && close(next, after.value) {
                marked[i + 1] = true;
            }
        }
    }

    if !cfg.keep_last && close(keys[count - 1].value, keys[count - 2].value) {
        marked[count - 1] = true;
    }

    keys.iter()
        .zip(marked)
        .filter_map(|(k, m)| m.then_some(*k))
        .collect()
}

/// Removes redundant keys from host curves with a validated configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyReducer {
    cfg: ReduceConfig,
}

impl KeyReducer {
    pub fn new(cfg: ReduceConfig) -> Result<Self, CurveError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.cfg
    }

    pub fn plan(&self, keys: &[Key]) -> Vec<Key> {
        redundant_keys(keys, &self.cfg)
    }

    /// Reduce one curve and return how many keys were deleted.
    ///
    /// On a host error the keys deleted so far stay deleted and are reported in
    /// [`CurveFailure::completed`].
    pub fn reduce_curve<S: CurveSource + ?Sized>(
        &self,
        source: &mut S,
        curve: &CurveHandle,
    ) -> Result<usize, CurveFailure> {
        let keys = source.query_keys(curve).map_err(|error| CurveFailure {
            curve: curve.clone(),
            completed: 0,
            error,
        })?;
        let plan = self.plan(&keys);
        debug!(
            "{curve}: {} of {} keys redundant (tolerance={}, stepped={}, keep_last={})",
            plan.len(),
            keys.len(),
            self.cfg.tolerance,
            self.cfg.stepped,
            self.cfg.keep_last
        );

        let mut removed = 0;
        for key in plan {
            source
                .delete_key(curve, key.time)
                .map_err(|error| CurveFailure {
                    curve: curve.clone(),
                    completed: removed,
                    error,
                })?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Reduce every curve in `curves`. A failing curve does not stop the batch.
    pub fn reduce<S: CurveSource + ?Sized>(
        &self,
        source: &mut S,
        curves: &[CurveHandle],
    ) -> ReduceReport {
        let mut report = ReduceReport::default();
        for curve in curves {
            report.curves += 1;
            match self.reduce_curve(source, curve) {
                Ok(n) => report.removed += n,
                Err(failure) => {
                    warn!(
                        "{}: reduction stopped after {} keys: {}",
                        failure.curve, failure.completed, failure.error
                    );
                    report.removed += failure.completed;
                    report.failures.push(failure);
                }
            }
        }
        report
    }
}

/// `reduceKeys(curves, stepped, keepLast, tolerance) -> removedCount`, plus failures.
pub fn reduce_keys<S: CurveSource + ?Sized>(
    source: &mut S,
    curves: &[CurveHandle],
    cfg: &ReduceConfig,
) -> Result<ReduceReport, CurveError> {
    Ok(KeyReducer::new(*cfg)?.reduce(source, curves))
}

/// Reduce all curves connected to the current selection as one undoable edit.
pub fn cleanup_selection<S>(scene: &mut S, cfg: &ReduceConfig) -> Result<ReduceReport, CurveError>
where
    S: CurveSource + SceneQuery + UndoHost + ?Sized,
{
    let reducer = KeyReducer::new(*cfg)?;
    undoable(scene, |scene| -> Result<ReduceReport, CurveError> {
        let (selection, curves) = selected_curves(&*scene)?;
        let report = reducer.reduce(scene, &curves);
        let names: Vec<&str> = selection.iter().map(|o| o.as_str()).collect();
        info!("{} keys removed on {:?}", report.removed, names);
        Ok(report)
    })
}
