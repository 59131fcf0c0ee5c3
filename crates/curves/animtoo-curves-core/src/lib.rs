//! animtoo curve tools (host-agnostic)
//!
//! Artist-facing cleanup passes over animation curves owned by a host scene graph.
//! The host is reached only through the capability traits in [`host`]; the in-memory
//! [`scene::MemoryScene`] adapter backs the CLI and the test-suite.

pub mod config;
pub mod cycle;
pub mod data;
pub mod error;
pub mod host;
pub mod ids;
pub mod offset;
pub mod reduce;
pub mod report;
pub mod round;
pub mod scene;
pub mod undo;

// Re-exports for consumers (adapters)
pub use config::ReduceConfig;
pub use cycle::{loop_curves, loop_selection, next_cycle};
pub use data::{Curve, Key};
pub use error::{CurveError, HostCommandError};
pub use host::{CurveSource, SceneQuery, UndoHost};
pub use ids::{CurveHandle, ObjectHandle};
pub use offset::{offset_curves, offset_curves_in_range, offset_selection, OffsetMode};
pub use reduce::{cleanup_selection, is_close, redundant_keys, reduce_keys, KeyReducer};
pub use report::{CurveFailure, EditReport, ReduceReport};
pub use round::round_key_values;
pub use scene::{parse_scene_json, MemoryScene, SceneObject};
pub use undo::{undoable, UndoChunk};
