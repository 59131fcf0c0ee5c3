//! Host-owned identifiers for curves and scene objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of an animation curve node in the host scene graph.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveHandle(pub String);

/// Name of a scene object (transform, joint, ...) that animation curves drive.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(pub String);

impl CurveHandle {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ObjectHandle {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurveHandle {
    fn from(s: &str) -> Self {
        CurveHandle(s.to_string())
    }
}

impl From<String> for CurveHandle {
    fn from(s: String) -> Self {
        CurveHandle(s)
    }
}

impl From<&str> for ObjectHandle {
    fn from(s: &str) -> Self {
        ObjectHandle(s.to_string())
    }
}

impl From<String> for ObjectHandle {
    fn from(s: String) -> Self {
        ObjectHandle(s)
    }
}
