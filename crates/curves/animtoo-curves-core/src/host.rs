//! Capability traits at the boundary to the host command layer.
//!
//! Tools depend only on these traits. Each host integration supplies an adapter;
//! [`crate::scene::MemoryScene`] is the in-process one.

use crate::data::Key;
use crate::error::HostCommandError;
use crate::ids::{CurveHandle, ObjectHandle};

/// Read and edit keys on host-owned animation curves.
pub trait CurveSource {
    /// All keys of `curve`, ordered by strictly increasing time.
    fn query_keys(&self, curve: &CurveHandle) -> Result<Vec<Key>, HostCommandError>;

    /// Remove the key at `time`. Deleting a time with no key must be a no-op.
    fn delete_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError>;

    /// Overwrite the value of the key at `time`.
    fn set_key_value(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError>;

    /// Move every key of `curve` by `offset` in time (relative time change).
    fn shift_keys(&mut self, curve: &CurveHandle, offset: f64) -> Result<(), HostCommandError>;

    /// Key `curve` at `time` with its current evaluated value, leaving the shape unchanged.
    /// Inserting where a key already exists must be a no-op.
    fn insert_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError>;

    /// Create a key at `time`, or overwrite the value of the key already there.
    fn set_key(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError>;
}

/// Selection and connection lookups used to pick which curves a tool targets.
pub trait SceneQuery {
    /// Current selection, in selection order.
    fn list_selected_objects(&self) -> Result<Vec<ObjectHandle>, HostCommandError>;

    /// Animation curves driving `object`.
    fn list_connected_curves(
        &self,
        object: &ObjectHandle,
    ) -> Result<Vec<CurveHandle>, HostCommandError>;
}

/// Host undo queue. Every `open_chunk` is paired with exactly one `close_chunk`.
pub trait UndoHost {
    fn open_chunk(&mut self);
    fn close_chunk(&mut self);
}

/// Resolve the current selection to its curves, deduplicated, in selection order.
pub fn selected_curves<S: SceneQuery + ?Sized>(
    scene: &S,
) -> Result<(Vec<ObjectHandle>, Vec<CurveHandle>), HostCommandError> {
    let selection = scene.list_selected_objects()?;
    let mut curves: Vec<CurveHandle> = Vec::new();
    for obj in &selection {
        for curve in scene.list_connected_curves(obj)? {
            if !curves.contains(&curve) {
                curves.push(curve);
            }
        }
    }
    Ok((selection, curves))
}
