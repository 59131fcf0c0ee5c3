#![allow(dead_code)]
use animtoo_curves::{
    parse_scene_json, Curve, CurveHandle, CurveSource, HostCommandError, Key, MemoryScene,
    ObjectHandle, SceneObject, SceneQuery, UndoHost,
};

pub fn keys(pairs: &[(f64, f64)]) -> Vec<Key> {
    pairs.iter().map(|&(t, v)| Key::new(t, v)).collect()
}

pub fn times(keys: &[Key]) -> Vec<f64> {
    keys.iter().map(|k| k.time).collect()
}

pub fn load_scene(name: &str) -> MemoryScene {
    let json = animtoo_test_fixtures::scenes::json(name).expect("fixture exists");
    parse_scene_json(&json).expect("fixture scene parses")
}

/// Scene with a single selected object driving one curve.
pub fn single_curve_scene(pairs: &[(f64, f64)]) -> (MemoryScene, CurveHandle) {
    let handle = CurveHandle::from("obj_attr");
    let mut scene = MemoryScene::new("single");
    scene
        .add_curve(Curve::new(handle.clone(), keys(pairs)))
        .unwrap();
    scene
        .add_object(SceneObject {
            name: ObjectHandle::from("obj"),
            selected: true,
            curves: vec![handle.clone()],
        })
        .unwrap();
    (scene, handle)
}

pub fn curve_times(scene: &MemoryScene, name: &str) -> Vec<f64> {
    times(&scene.curve(&CurveHandle::from(name)).unwrap().keys)
}

pub fn curve_values(scene: &MemoryScene, name: &str) -> Vec<f64> {
    scene
        .curve(&CurveHandle::from(name))
        .unwrap()
        .keys
        .iter()
        .map(|k| k.value)
        .collect()
}

/// Wraps a scene and fails host edits on one curve after a number of successful calls.
pub struct FlakyHost {
    pub inner: MemoryScene,
    pub broken: CurveHandle,
    pub allowed_edits: usize,
    pub fail_query: bool,
    pub delete_calls: usize,
}

impl FlakyHost {
    pub fn new(inner: MemoryScene, broken: &str, allowed_edits: usize) -> Self {
        Self {
            inner,
            broken: CurveHandle::from(broken),
            allowed_edits,
            fail_query: false,
            delete_calls: 0,
        }
    }

    fn check_edit(&mut self, command: &str, curve: &CurveHandle) -> Result<(), HostCommandError> {
        if curve == &self.broken {
            if self.allowed_edits == 0 {
                return Err(HostCommandError::new(command, curve.as_str(), "node is locked"));
            }
            self.allowed_edits -= 1;
        }
        Ok(())
    }
}

impl CurveSource for FlakyHost {
    fn query_keys(&self, curve: &CurveHandle) -> Result<Vec<Key>, HostCommandError> {
        if self.fail_query && curve == &self.broken {
            return Err(HostCommandError::new("queryKeys", curve.as_str(), "node is locked"));
        }
        self.inner.query_keys(curve)
    }

    fn delete_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError> {
        self.delete_calls += 1;
        self.check_edit("deleteKey", curve)?;
        self.inner.delete_key(curve, time)
    }

    fn set_key_value(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError> {
        self.check_edit("setKeyValue", curve)?;
        self.inner.set_key_value(curve, time, value)
    }

    fn shift_keys(&mut self, curve: &CurveHandle, offset: f64) -> Result<(), HostCommandError> {
        self.check_edit("shiftKeys", curve)?;
        self.inner.shift_keys(curve, offset)
    }

    fn insert_key(&mut self, curve: &CurveHandle, time: f64) -> Result<(), HostCommandError> {
        self.check_edit("insertKey", curve)?;
        self.inner.insert_key(curve, time)
    }

    fn set_key(
        &mut self,
        curve: &CurveHandle,
        time: f64,
        value: f64,
    ) -> Result<(), HostCommandError> {
        self.check_edit("setKeyframe", curve)?;
        self.inner.set_key(curve, time, value)
    }
}

impl SceneQuery for FlakyHost {
    fn list_selected_objects(&self) -> Result<Vec<ObjectHandle>, HostCommandError> {
        self.inner.list_selected_objects()
    }

    fn list_connected_curves(
        &self,
        object: &ObjectHandle,
    ) -> Result<Vec<CurveHandle>, HostCommandError> {
        self.inner.list_connected_curves(object)
    }
}

impl UndoHost for FlakyHost {
    fn open_chunk(&mut self) {
        self.inner.open_chunk();
    }

    fn close_chunk(&mut self) {
        self.inner.close_chunk();
    }
}
