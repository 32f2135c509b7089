//! Recorded input scripts, replayed against a notebook.
//!
//! A script is a JSON array of steps tagged by `type`:
//!
//! ```json
//! [
//!   { "type": "viewport", "width": 1024, "height": 768 },
//!   { "type": "down", "x": 10, "y": 10 },
//!   { "type": "move", "x": 20, "y": 10 },
//!   { "type": "up" }
//! ]
//! ```
//!
//! Pointer positions are client coordinates, mapped through the canvas
//! bounds (the canvas sits at the origin unless a `bounds` step moves it).

use crate::app::NotebookApp;
use crate::error::{AppError, AppResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use shakyo_core::canvas::CanvasError;
use shakyo_core::coords::PointerInput;
use shakyo_core::storage::Storage;
use shakyo_core::tools::ToolKind;
use shakyo_render::Surface;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptStep {
    /// Resize the canvas for a viewport.
    Viewport { width: f64, height: f64 },
    /// Move the canvas' on-screen top-left corner.
    Bounds { left: f64, top: f64 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd,
    Tool { tool: ToolKind },
    Color { color: String },
    Width { width: f64 },
    Clear,
    Title { title: String },
}

/// Parse a script from JSON text.
pub fn parse_script(json: &str, path: &Path) -> AppResult<Vec<ScriptStep>> {
    serde_json::from_str(json).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> AppResult<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json, path)
}

/// What a replay did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub strokes: usize,
    pub full_repaints: usize,
    pub segments: usize,
}

/// Feed every step to `app` in order. Stops at the first rejected step.
pub fn replay<St: Storage, S: Surface>(app: &mut NotebookApp<St, S>, steps: &[ScriptStep]) -> AppResult<ReplaySummary> {
    let mut origin = Point::ZERO;
    place_canvas(app, origin);

    for (index, step) in steps.iter().enumerate() {
        log::trace!("Step {}: {:?}", index, step);
        apply_step(app, step, &mut origin).map_err(|source| AppError::Step { index, source })?;
    }

    let counters = app.counters();
    Ok(ReplaySummary {
        steps: steps.len(),
        strokes: app.strokes().len(),
        full_repaints: counters.full_repaints,
        segments: counters.segments,
    })
}

fn place_canvas<St: Storage, S: Surface>(app: &mut NotebookApp<St, S>, origin: Point) {
    let size = app.size().to_kurbo();
    app.set_bounds(Some(Rect::from_origin_size(origin, size)));
}

fn apply_step<St: Storage, S: Surface>(
    app: &mut NotebookApp<St, S>,
    step: &ScriptStep,
    origin: &mut Point,
) -> Result<(), CanvasError> {
    match step {
        ScriptStep::Viewport { width, height } => {
            app.resize_to_viewport(*width, *height);
            place_canvas(app, *origin);
        }
        ScriptStep::Bounds { left, top } => {
            *origin = Point::new(*left, *top);
            place_canvas(app, *origin);
        }
        ScriptStep::Down { x, y } => app.pointer_down(&PointerInput::mouse(*x, *y)),
        ScriptStep::Move { x, y } => app.pointer_move(&PointerInput::mouse(*x, *y)),
        ScriptStep::Up | ScriptStep::TouchEnd => app.pointer_up(),
        ScriptStep::Leave => app.pointer_leave(),
        ScriptStep::TouchStart { touches } => app.pointer_down(&PointerInput::touch(touches.clone())),
        ScriptStep::TouchMove { touches } => app.pointer_move(&PointerInput::touch(touches.clone())),
        ScriptStep::Tool { tool } => app.select_tool(*tool)?,
        ScriptStep::Color { color } => app.set_color(color)?,
        ScriptStep::Width { width } => app.set_width(*width)?,
        ScriptStep::Clear => app.clear(),
        ScriptStep::Title { title } => {
            app.set_title(title);
        }
    }
    Ok(())
}
