//! Curve data model: ordered (time, value) keys.

use serde::{Deserialize, Serialize};

use crate::ids::CurveHandle;

/// One keyframe sample. Serialized as a `[time, value]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Key {
    pub time: f64,
    pub value: f64,
}

impl Key {
    #[inline]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Key {
    fn from((time, value): (f64, f64)) -> Self {
        Key { time, value }
    }
}

impl From<Key> for (f64, f64) {
    fn from(k: Key) -> Self {
        (k.time, k.value)
    }
}

/// An animation curve snapshot: keys ordered by strictly increasing time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub name: CurveHandle,
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Curve {
    pub fn new(name: impl Into<CurveHandle>, keys: Vec<Key>) -> Self {
        Self {
            name: name.into(),
            keys,
        }
    }

    /// Validate basic invariants (finite samples, strictly increasing times).
    pub fn validate_basic(&self) -> Result<(), String> {
        let mut last = f64::NEG_INFINITY;
        for k in &self.keys {
            if !k.time.is_finite() || !k.value.is_finite() {
                return Err(format!("key values must be finite for '{}'", self.name));
            }
            if k.time <= last {
                return Err(format!(
                    "key times must be strictly increasing for '{}' (found {} after {})",
                    self.name, k.time, last
                ));
            }
            last = k.time;
        }
        Ok(())
    }

    /// Index of the key sitting exactly at `time`.
    pub fn find_key(&self, time: f64) -> Option<usize> {
        self.keys.iter().position(|k| k.time == time)
    }

    /// Evaluate the curve at `time`: linear between keys, constant before the first
    /// and after the last key. `None` for a curve without keys.
    pub fn evaluate(&self, time: f64) -> Option<f64> {
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        if time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }
        // keys[i - 1].time < time <= keys[i].time
        let i = self.keys.partition_point(|k| k.time < time);
        let (a, b) = (self.keys[i - 1], self.keys[i]);
        let lt = (time - a.time) / (b.time - a.time);
        Some(a.value + (b.value - a.value) * lt)
    }

    /// Insert `key` in time order, replacing the value of a key at the same time.
    pub fn upsert(&mut self, key: Key) {
        let i = self.keys.partition_point(|k| k.time < key.time);
        match self.keys.get_mut(i) {
            Some(existing) if existing.time == key.time => existing.value = key.value,
            _ => self.keys.insert(i, key),
        }
    }
}
