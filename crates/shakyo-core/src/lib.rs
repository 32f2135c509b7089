//! Shakyo Core Library
//!
//! Platform-agnostic stroke capture, erasing and document persistence for
//! the Shakyo note canvas.

pub mod canvas;
pub mod color;
pub mod config;
pub mod coords;
pub mod document;
pub mod eraser;
pub mod input;
pub mod storage;
pub mod stroke;
pub mod tools;

pub use canvas::{CanvasError, CanvasSession, CanvasSize, Redraw};
pub use color::{ColorParseError, HexColor};
pub use config::CanvasConfig;
pub use coords::{PointerInput, to_canvas};
pub use document::NoteDocument;
pub use eraser::{DEFAULT_ERASE_THRESHOLD, Eraser};
pub use input::{InputAction, InputPhase, PointerEvent, Segment, StrokeInput};
pub use storage::{LoadedDocument, MemoryStorage, NotePersistence, Storage, StorageError, StorageResult};
pub use stroke::{Stroke, StrokeId, StrokeSet};
pub use tools::{ToolKind, ToolSettings, ToolSource, ToolState};
