//! Round key values to the nearest whole number.

use log::{debug, warn};

use crate::host::CurveSource;
use crate::ids::CurveHandle;
use crate::report::{CurveFailure, EditReport};

/// Round every key value of `curves` (half away from zero).
///
/// Keys that are already whole numbers are left alone and not counted.
pub fn round_key_values<S: CurveSource + ?Sized>(
    source: &mut S,
    curves: &[CurveHandle],
) -> EditReport {
    let mut report = EditReport::default();
    for curve in curves {
        report.curves += 1;
        match round_curve(source, curve) {
            Ok(n) => {
                debug!("{curve}: rounded {n} keys");
                report.edited += n;
            }
            Err(failure) => {
                warn!(
                    "{}: rounding stopped after {} keys: {}",
                    failure.curve, failure.completed, failure.error
                );
                report.edited += failure.completed;
                report.failures.push(failure);
            }
        }
    }
    report
}

fn round_curve<S: CurveSource + ?Sized>(
    source: &mut S,
    curve: &CurveHandle,
) -> Result<usize, CurveFailure> {
    let keys = source.query_keys(curve).map_err(|error| CurveFailure {
        curve: curve.clone(),
        completed: 0,
        error,
    })?;
    let mut edited = 0;
    for key in keys {
        let rounded = key.value.round();
        if rounded == key.value {
            continue;
        }
        source
            .set_key_value(curve, key.time, rounded)
            .map_err(|error| CurveFailure {
                curve: curve.clone(),
                completed: edited,
                error,
            })?;
        edited += 1;
    }
    Ok(edited)
}
