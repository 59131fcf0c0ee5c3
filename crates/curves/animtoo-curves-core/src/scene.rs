//! In-memory scene adapter and its JSON scene format.
//!
//! Scene JSON:
//! ```json
//! {
//!   "name": "shot010",
//!   "objects": [{ "name": "ball", "selected": true, "curves": ["ball_translateY"] }],
//!   "curves": [{ "name": "ball_translateY", "keys": [[1, 0.0], [12, 5.0]] }],
//!   "selection": ["ball"]
//! }
//! ```
//!
//! `selection` is optional and gives the order objects were picked in; without it the
//! `selected` flags are read in declaration order.
//!
//! Undo follows host semantics: the outermost open chunk snapshots every curve and
//! [`MemoryScene::undo`] restores the most recent snapshot that saw an edit.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::{Curve, Key};
use crate::error::{CurveError, HostCommandError};
use crate::host::{CurveSource, SceneQuery, UndoHost};
use crate::ids::{CurveHandle, ObjectHandle};

/// A scene object and the animation curves connected to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: ObjectHandle,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub curves: Vec<CurveHandle>,
}

#[derive(Debug, Default)]
pub struct MemoryScene {
    pub name: String,
    objects: Vec<SceneObject>,
    curves: HashMap<CurveHandle, Curve>,
    /// Curve insertion order, kept for deterministic export and snapshots.
    order: Vec<CurveHandle>,
    /// Selected objects in pick order.
    selection: Vec<ObjectHandle>,
    undo_depth: usize,
    undo_stack: Vec<Vec<Curve>>,
}

impl MemoryScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a curve after validating it. Names must be unique within the scene.
    pub fn add_curve(&mut self, curve: Curve) -> Result<(), CurveError> {
        curve
            .validate_basic()
            .map_err(|reason| CurveError::InvalidCurve {
                curve: curve.name.to_string(),
                reason,
            })?;
        if self.curves.contains_key(&curve.name) {
            return Err(CurveError::InvalidCurve {
                curve: curve.name.to_string(),
                reason: "duplicate curve name".into(),
            });
        }
        self.order.push(curve.name.clone());
        self.curves.insert(curve.name.clone(), curve);
        Ok(())
    }

    /// Add an object; every curve it references must already exist.
    pub fn add_object(&mut self, object: SceneObject) -> Result<(), CurveError> {
        if let Some(missing) = object.curves.iter().find(|c| !self.curves.contains_key(*c)) {
            return Err(CurveError::InvalidCurve {
                curve: missing.to_string(),
                reason: format!("referenced by '{}' but not defined", object.name),
            });
        }
        if object.selected && !self.selection.contains(&object.name) {
            self.selection.push(object.name.clone());
        }
        self.objects.push(object);
        Ok(())
    }

    /// Replace the selection, keeping the order of `names`. Unknown and repeated
    /// names are ignored.
    pub fn select(&mut self, names: &[ObjectHandle]) {
        self.selection.clear();
        for name in names {
            let known = self.objects.iter().any(|o| &o.name == name);
            if known && !self.selection.contains(name) {
                self.selection.push(name.clone());
            }
        }
        for obj in &mut self.objects {
            obj.selected = self.selection.contains(&obj.name);
        }
    }

    /// Selected objects in the order they were picked.
    pub fn selection(&self) -> &[ObjectHandle] {
        &self.selection
    }

    pub fn curve(&self, name: &CurveHandle) -> Option<&Curve> {
        self.curves.get(name)
    }

    /// Curves in insertion order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.order.iter().filter_map(|n| self.curves.get(n))
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_depth
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Restore the curves to the state before the last undoable edit.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<Curve> {
        self.curves().cloned().collect()
    }

    fn restore(&mut self, snapshot: Vec<Curve>) {
        for curve in snapshot {
            self.curves.insert(curve.name.clone(), curve);
        }
    }

    fn curve_mut(
        &mut self,
        command: &str,
        name: &CurveHandle,
    ) -> Result<&mut Curve, HostCommandError> {
        self.curves
            .get_mut(name)
            .ok_or_else(|| HostCommandError::new(command, name.as_str(), "no such curve"))
    }

    pub fn to_json(&self) -> Result<String, CurveError> {
        let stored = StoredScene {
            name: self.name.clone(),
            objects: self.objects.clone(),
            curves: self.snapshot(),
            selection: self.selection.clone(),
        };
        serde_json::to_string_pretty(&stored).map_err(|e| CurveError::Serialize(e.to_string()))
    }
}

/// Parse scene JSON into a validated [`MemoryScene`].
pub fn parse_scene_json(s: &str) -> Result<MemoryScene, CurveError> {
    let stored: StoredScene =
        serde_json::from_str(s).map_err(|e| CurveError::Parse(e.to_string()))?;
    let mut scene = MemoryScene::new(stored.name);
    for curve in stored.curves {
        scene.add_curve(curve)?;
    }
    for object in stored.objects {
        scene.add_object(object)?;
    }
    if !stored.selection.is_empty() {
        scene.select(&stored.selection);
    }
    Ok(scene)
}

impl CurveSource for MemoryScene {
    fn query_keys(&self, curve: &CurveHandle) -> Result<Vec<Key>, HostCommandError> {
        self.curves
            .get(curve)
            .map(|c| c.keys.clone())
            .ok_or_else(|| HostCommandError::new("queryKeys", curve.as_str(), "no such curve"))
    }

    fn delete_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError> {
        let c = self.curve_mut("deleteKey", curve)?;
        if let Some(i) = c.find_key(time) {
            c.keys.remove(i);
        }
        Ok(())
    }

    fn set_key_value(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError> {
        if !value.is_finite() {
            return Err(HostCommandError::new(
                "setKeyValue",
                curve.as_str(),
                format!("value must be finite, got {value}"),
            ));
        }
        let c = self.curve_mut("setKeyValue", curve)?;
        match c.find_key(time) {
            Some(i) => {
                c.keys[i].value = value;
                Ok(())
            }
            None => Err(HostCommandError::new(
                "setKeyValue",
                curve.as_str(),
                format!("no key at time {time}"),
            )),
        }
    }

    fn shift_keys(&mut self, curve: &CurveHandle, offset: f64) -> Result<(), HostCommandError> {
        if !offset.is_finite() {
            return Err(HostCommandError::new(
                "shiftKeys",
                curve.as_str(),
                format!("offset must be finite, got {offset}"),
            ));
        }
        let c = self.curve_mut("shiftKeys", curve)?;
        for k in &mut c.keys {
            k.time += offset;
        }
        Ok(())
    }

    fn insert_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError> {
        if !time.is_finite() {
            return Err(HostCommandError::new(
                "insertKey",
                curve.as_str(),
                format!("time must be finite, got {time}"),
            ));
        }
        let c = self.curve_mut("insertKey", curve)?;
        if c.find_key(time).is_some() {
            return Ok(());
        }
        let value = c.evaluate(time).ok_or_else(|| {
            HostCommandError::new("insertKey", curve.as_str(), "curve has no keys")
        })?;
        c.upsert(Key::new(time, value));
        Ok(())
    }

    fn set_key(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError> {
        if !time.is_finite() || !value.is_finite() {
            return Err(HostCommandError::new(
                "setKeyframe",
                curve.as_str(),
                format!("key ({time}, {value}) must be finite"),
            ));
        }
        let c = self.curve_mut("setKeyframe", curve)?;
        c.upsert(Key::new(time, value));
        Ok(())
    }
}

impl SceneQuery for MemoryScene {
    fn list_selected_objects(&self) -> Result<Vec<ObjectHandle>, HostCommandError> {
        Ok(self.selection.clone())
    }

    fn list_connected_curves(
        &self,
        object: &ObjectHandle,
    ) -> Result<Vec<CurveHandle>, HostCommandError> {
        self.objects
            .iter()
            .find(|o| &o.name == object)
            .map(|o| o.curves.clone())
            .ok_or_else(|| {
                HostCommandError::new("listConnections", object.as_str(), "no such object")
            })
    }
}

impl UndoHost for MemoryScene {
    fn open_chunk(&mut self) {
        if self.undo_depth == 0 {
            let snapshot = self.snapshot();
            self.undo_stack.push(snapshot);
        }
        self.undo_depth += 1;
    }

    fn close_chunk(&mut self) {
        self.undo_depth = self.undo_depth.saturating_sub(1);
        if self.undo_depth == 0 {
            // Chunks without edits leave nothing to undo.
            let unchanged = self
                .undo_stack
                .last()
                .is_some_and(|snap| snap.iter().eq(self.curves()));
            if unchanged {
                self.undo_stack.pop();
            }
        }
    }
}

// ----- JSON schema (serde) -----

#[derive(Serialize, Deserialize)]
struct StoredScene {
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<SceneObject>,
    #[serde(default)]
    curves: Vec<Curve>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    selection: Vec<ObjectHandle>,
}
