//! Drawing session state: committed strokes, canvas size, tools and input.

use crate::color::HexColor;
use crate::config::CanvasConfig;
use crate::eraser::Eraser;
use crate::input::{InputAction, PointerEvent, Segment, StrokeInput};
use crate::stroke::{Stroke, StrokeSet};
use crate::tools::{ToolKind, ToolState};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from rejected session operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Cannot switch tools while a stroke is in progress")]
    StrokeInProgress,
    #[error("Invalid color: {0}")]
    InvalidColor(#[from] crate::color::ColorParseError),
    #[error("Invalid stroke width: {0}")]
    InvalidWidth(f64),
    #[error("Tool {0:?} has no color or width")]
    ToolHasNoSettings(ToolKind),
}

/// Canvas dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas size for a viewport: `min(vw - margin_x, max_w) x min(vh - margin_y, max_h)`,
    /// never below zero.
    pub fn for_viewport(viewport_width: f64, viewport_height: f64, config: &CanvasConfig) -> Self {
        let fit = |available: f64, margin: u32, max: u32| -> u32 {
            let fitted = (available - f64::from(margin)).min(f64::from(max));
            if fitted.is_finite() && fitted > 0.0 { fitted.floor() as u32 } else { 0 }
        };
        Self {
            width: fit(viewport_width, config.horizontal_margin, config.max_width),
            height: fit(viewport_height, config.vertical_margin, config.max_height),
        }
    }

    pub fn to_kurbo(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// What the drawing surface needs after a session operation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub enum Redraw {
    /// Surface is already up to date.
    None,
    /// Paint one more segment of the in-progress stroke on top of what is there.
    Segment(Segment),
    /// Repaint background, ruling and every committed stroke.
    Full,
}

/// A single drawing session over one document.
///
/// Every mutation of the stroke collection reports exactly one
/// [`Redraw::Full`]; the caller is expected to repaint before handling the
/// next event.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    config: CanvasConfig,
    size: CanvasSize,
    strokes: StrokeSet,
    tools: ToolState,
    input: StrokeInput,
    eraser: Eraser,
    title: String,
}

impl CanvasSession {
    /// Empty session for a new document.
    pub fn new(config: CanvasConfig) -> Self {
        let title = config.default_title.clone();
        Self::with_document(config, title, StrokeSet::new())
    }

    /// Session over existing strokes.
    pub fn with_document(config: CanvasConfig, title: impl Into<String>, strokes: StrokeSet) -> Self {
        Self {
            size: CanvasSize::new(config.initial_width, config.initial_height),
            eraser: Eraser::new(config.erase_threshold),
            config,
            strokes,
            tools: ToolState::new(),
            input: StrokeInput::new(),
            title: title.into(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Committed strokes, back to front.
    pub fn strokes(&self) -> &StrokeSet {
        &self.strokes
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Stroke being drawn right now, if any.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.input.current_stroke()
    }

    pub fn is_drawing(&self) -> bool {
        !self.input.is_idle()
    }

    /// Feed a canvas-local pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Redraw {
        let action = self.input.handle_pointer_event(event, &self.tools);
        self.apply(action)
    }

    pub fn pointer_down(&mut self, position: Point) -> Redraw {
        self.handle_pointer_event(PointerEvent::Down { position })
    }

    pub fn pointer_move(&mut self, position: Point) -> Redraw {
        self.handle_pointer_event(PointerEvent::Move { position })
    }

    pub fn pointer_up(&mut self) -> Redraw {
        self.handle_pointer_event(PointerEvent::Up)
    }

    pub fn pointer_leave(&mut self) -> Redraw {
        self.handle_pointer_event(PointerEvent::Leave)
    }

    fn apply(&mut self, action: InputAction) -> Redraw {
        match action {
            InputAction::None => Redraw::None,
            InputAction::Segment(segment) => Redraw::Segment(segment),
            InputAction::Commit(stroke) => {
                log::debug!("Committing stroke {} ({} points)", stroke.id, stroke.len());
                self.strokes.commit(stroke);
                Redraw::Full
            }
            InputAction::Erase(probe) => {
                if self.eraser.erase(&mut self.strokes, probe) > 0 {
                    Redraw::Full
                } else {
                    Redraw::None
                }
            }
        }
    }

    /// Set the canvas size. Always requires a full repaint; stroke points are
    /// kept in their original pixel coordinates.
    pub fn resize(&mut self, size: CanvasSize) -> Redraw {
        if size != self.size {
            log::debug!("Canvas resized {}x{} -> {}x{}", self.size.width, self.size.height, size.width, size.height);
        }
        self.size = size;
        Redraw::Full
    }

    /// Recompute the canvas size from the viewport.
    pub fn resize_to_viewport(&mut self, viewport_width: f64, viewport_height: f64) -> Redraw {
        let size = CanvasSize::for_viewport(viewport_width, viewport_height, &self.config);
        self.resize(size)
    }

    /// Switch tools. Only allowed between strokes.
    pub fn select_tool(&mut self, tool: ToolKind) -> Result<(), CanvasError> {
        if self.is_drawing() {
            return Err(CanvasError::StrokeInProgress);
        }
        if tool != self.tools.active() {
            log::debug!("Tool switched to {}", tool.name());
        }
        self.tools.select(tool);
        Ok(())
    }

    /// Set the active tool's color.
    pub fn set_color(&mut self, color: HexColor) -> Result<(), CanvasError> {
        self.tools.set_color(color)
    }

    /// Parse and set the active tool's color.
    pub fn set_color_str(&mut self, color: &str) -> Result<(), CanvasError> {
        self.set_color(color.parse()?)
    }

    /// Set the active tool's width.
    pub fn set_width(&mut self, width: f64) -> Result<(), CanvasError> {
        self.tools.set_width(width)
    }

    /// Remove all strokes, including one being drawn.
    pub fn clear(&mut self) -> Redraw {
        self.input.cancel();
        self.strokes.clear();
        log::debug!("Canvas cleared");
        Redraw::Full
    }

    /// Rename the document. Blank titles are ignored; returns whether the title changed.
    pub fn set_title(&mut self, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() || trimmed == self.title {
            return false;
        }
        self.title = trimmed.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CanvasSession {
        CanvasSession::new(CanvasConfig::default())
    }

    fn draw(session: &mut CanvasSession, points: &[(f64, f64)]) -> Vec<Redraw> {
        let mut redraws = vec![session.pointer_down(Point::new(points[0].0, points[0].1))];
        for &(x, y) in &points[1..] {
            redraws.push(session.pointer_move(Point::new(x, y)));
        }
        redraws.push(session.pointer_up());
        redraws
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session();
        assert_eq!(session.title(), "Shakyo");
        assert_eq!(session.size(), CanvasSize::new(800, 600));
        assert!(session.strokes().is_empty());
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_pen_stroke_scenario() {
        let mut session = session();
        session.set_color_str("#000000").unwrap();
        session.set_width(2.0).unwrap();

        let redraws = draw(&mut session, &[(10.0, 10.0), (20.0, 10.0), (30.0, 10.0)]);

        assert_eq!(redraws[0], Redraw::None);
        assert!(matches!(redraws[1], Redraw::Segment(_)));
        assert!(matches!(redraws[2], Redraw::Segment(_)));
        assert_eq!(redraws[3], Redraw::Full);

        assert_eq!(session.strokes().len(), 1);
        let stroke = session.strokes().get(0).unwrap();
        assert_eq!(
            stroke.points,
            vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(30.0, 10.0)]
        );
        assert_eq!(stroke.color, HexColor::BLACK);
        assert!((stroke.width - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_in_progress_stroke_not_in_collection() {
        let mut session = session();
        let _ = session.pointer_down(Point::new(1.0, 1.0));
        let _ = session.pointer_move(Point::new(2.0, 2.0));
        assert!(session.strokes().is_empty());
        assert_eq!(session.current_stroke().unwrap().len(), 2);
    }

    #[test]
    fn test_leave_commits() {
        let mut session = session();
        let _ = session.pointer_down(Point::new(1.0, 1.0));
        let _ = session.pointer_move(Point::new(2.0, 2.0));
        assert_eq!(session.pointer_leave(), Redraw::Full);
        assert_eq!(session.strokes().len(), 1);
        assert!(session.current_stroke().is_none());
    }

    #[test]
    fn test_single_click_commits_single_point_stroke() {
        let mut session = session();
        let _ = session.pointer_down(Point::new(7.0, 7.0));
        assert_eq!(session.pointer_up(), Redraw::Full);
        assert_eq!(session.strokes().get(0).unwrap().len(), 1);
    }

    #[test]
    fn test_erase_hit_and_miss() {
        let mut session = session();
        let _ = draw(&mut session, &[(50.0, 50.0), (52.0, 50.0)]);
        session.select_tool(ToolKind::Eraser).unwrap();

        assert_eq!(session.pointer_down(Point::new(100.0, 100.0)), Redraw::None);
        assert_eq!(session.strokes().len(), 1);

        assert_eq!(session.pointer_down(Point::new(55.0, 50.0)), Redraw::Full);
        assert!(session.strokes().is_empty());
        assert!(!session.is_drawing());
    }

    #[test]
    fn test_configured_erase_threshold() {
        let mut session = CanvasSession::new(CanvasConfig::default().with_erase_threshold(3.0));
        let _ = draw(&mut session, &[(50.0, 50.0), (52.0, 50.0)]);
        session.select_tool(ToolKind::Eraser).unwrap();
        assert_eq!(session.pointer_down(Point::new(56.0, 50.0)), Redraw::None);
        assert_eq!(session.pointer_down(Point::new(54.0, 50.0)), Redraw::Full);
    }

    #[test]
    fn test_tool_switch_rejected_mid_stroke() {
        let mut session = session();
        let _ = session.pointer_down(Point::new(0.0, 0.0));
        assert!(matches!(
            session.select_tool(ToolKind::Highlighter),
            Err(CanvasError::StrokeInProgress)
        ));
        let _ = session.pointer_up();
        assert!(session.select_tool(ToolKind::Highlighter).is_ok());
        assert_eq!(session.tools().active(), ToolKind::Highlighter);
    }

    #[test]
    fn test_highlighter_stroke_flagged() {
        let mut session = session();
        session.select_tool(ToolKind::Highlighter).unwrap();
        let _ = draw(&mut session, &[(0.0, 0.0), (10.0, 0.0)]);
        let stroke = session.strokes().get(0).unwrap();
        assert!(stroke.is_highlighter);
        assert_eq!(stroke.color, HexColor::YELLOW);
    }

    #[test]
    fn test_invalid_color_string() {
        let mut session = session();
        assert!(matches!(session.set_color_str("red"), Err(CanvasError::InvalidColor(_))));
    }

    #[test]
    fn test_resize_keeps_points() {
        let mut session = session();
        let _ = session.resize(CanvasSize::new(800, 600));
        let _ = draw(&mut session, &[(700.0, 550.0), (790.0, 590.0)]);

        assert_eq!(session.resize(CanvasSize::new(640, 480)), Redraw::Full);
        assert_eq!(session.size(), CanvasSize::new(640, 480));
        let stroke = session.strokes().get(0).unwrap();
        assert_eq!(stroke.points[1], Point::new(790.0, 590.0));
    }

    #[test]
    fn test_resize_to_viewport_formula() {
        let mut session = session();
        let _ = session.resize_to_viewport(1920.0, 1080.0);
        assert_eq!(session.size(), CanvasSize::new(1200, 800));

        let _ = session.resize_to_viewport(740.0, 680.0);
        assert_eq!(session.size(), CanvasSize::new(640, 480));

        let _ = session.resize_to_viewport(50.0, 100.0);
        assert_eq!(session.size(), CanvasSize::new(0, 0));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut session = session();
        let _ = draw(&mut session, &[(0.0, 0.0), (1.0, 1.0)]);
        let _ = session.pointer_down(Point::new(5.0, 5.0));

        assert_eq!(session.clear(), Redraw::Full);
        assert!(session.strokes().is_empty());
        assert!(!session.is_drawing());
        assert_eq!(session.pointer_up(), Redraw::None);
    }

    #[test]
    fn test_set_title_trims_and_ignores_blank() {
        let mut session = session();
        assert!(session.set_title("  Meeting notes "));
        assert_eq!(session.title(), "Meeting notes");
        assert!(!session.set_title("   "));
        assert_eq!(session.title(), "Meeting notes");
    }
}
