//! Pointer input state machine.
//!
//! Turns a stream of canvas-local pointer events into stroke lifecycle
//! actions. The machine owns the in-progress stroke exclusively; nothing is
//! shared with the committed collection until the stroke is handed out in
//! [`InputAction::Commit`].

use crate::color::HexColor;
use crate::stroke::Stroke;
use crate::tools::{ToolKind, ToolSource};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the surface; ends a stroke like `Up`.
    Leave,
}

/// One incremental line segment of a stroke being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: HexColor,
    pub width: f64,
    pub is_highlighter: bool,
}

/// What the caller must do after feeding an event.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum InputAction {
    /// Nothing changed.
    None,
    /// A stroke was extended; draw this segment.
    Segment(Segment),
    /// A stroke finished and must be appended to the collection.
    Commit(Stroke),
    /// Run an erase pass at this point.
    Erase(Point),
}

/// Current phase of the machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputPhase {
    #[default]
    Idle,
    Drawing {
        /// Stroke under construction.
        stroke: Stroke,
        /// Last point painted incrementally.
        last: Point,
    },
}

/// Tracks the stroke currently being drawn.
#[derive(Debug, Clone, Default)]
pub struct StrokeInput {
    phase: InputPhase,
}

impl StrokeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &InputPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, InputPhase::Idle)
    }

    /// The in-progress stroke, if drawing.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        match &self.phase {
            InputPhase::Drawing { stroke, .. } => Some(stroke),
            InputPhase::Idle => None,
        }
    }

    /// Feed one pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, tools: &impl ToolSource) -> InputAction {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, tools),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up | PointerEvent::Leave => self.pointer_release(),
        }
    }

    /// Pointer pressed. Starts a stroke, or requests an erase pass when the
    /// eraser is active. A press while already drawing is ignored.
    pub fn pointer_down(&mut self, position: Point, tools: &impl ToolSource) -> InputAction {
        if !self.is_idle() {
            log::trace!("Ignoring pointer down while a stroke is in progress");
            return InputAction::None;
        }

        if tools.active_tool() == ToolKind::Eraser {
            return InputAction::Erase(position);
        }

        let Some(settings) = tools.stroke_settings() else {
            return InputAction::None;
        };

        let stroke = Stroke::begin(
            position,
            settings.color,
            settings.width,
            tools.active_tool() == ToolKind::Highlighter,
        );
        log::trace!("Stroke {} started at ({:.1}, {:.1})", stroke.id, position.x, position.y);
        self.phase = InputPhase::Drawing { stroke, last: position };
        InputAction::None
    }

    /// Pointer moved. Extends the current stroke and yields the new segment.
    pub fn pointer_move(&mut self, position: Point) -> InputAction {
        match std::mem::take(&mut self.phase) {
            InputPhase::Drawing { stroke, last } => {
                let stroke = stroke.with_point(position);
                let segment = Segment {
                    from: last,
                    to: position,
                    color: stroke.color,
                    width: stroke.width,
                    is_highlighter: stroke.is_highlighter,
                };
                self.phase = InputPhase::Drawing { stroke, last: position };
                InputAction::Segment(segment)
            }
            InputPhase::Idle => InputAction::None,
        }
    }

    /// Pointer released or left the surface. Hands out the finished stroke.
    pub fn pointer_release(&mut self) -> InputAction {
        match std::mem::take(&mut self.phase) {
            InputPhase::Drawing { stroke, .. } => InputAction::Commit(stroke),
            InputPhase::Idle => InputAction::None,
        }
    }

    /// Drop any in-progress stroke without committing it.
    pub fn cancel(&mut self) {
        self.phase = InputPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolState;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    #[test]
    fn test_down_starts_drawing() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();

        assert_eq!(input.handle_pointer_event(down(10.0, 10.0), &tools), InputAction::None);
        assert!(!input.is_idle());
        assert_eq!(input.current_stroke().unwrap().points, vec![Point::new(10.0, 10.0)]);
    }

    #[test]
    fn test_move_yields_segment_from_last_point() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(10.0, 10.0), &tools);

        let first = input.handle_pointer_event(mv(20.0, 10.0), &tools);
        let second = input.handle_pointer_event(mv(30.0, 12.0), &tools);

        let InputAction::Segment(first) = first else { panic!("expected segment") };
        let InputAction::Segment(second) = second else { panic!("expected segment") };
        assert_eq!((first.from, first.to), (Point::new(10.0, 10.0), Point::new(20.0, 10.0)));
        assert_eq!((second.from, second.to), (Point::new(20.0, 10.0), Point::new(30.0, 12.0)));
        assert_eq!(first.color, HexColor::BLACK);
        assert!((first.width - 2.0).abs() < f64::EPSILON);
        assert!(!first.is_highlighter);
    }

    #[test]
    fn test_up_commits_stroke_with_all_points() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(10.0, 10.0), &tools);
        let _ = input.handle_pointer_event(mv(20.0, 10.0), &tools);
        let _ = input.handle_pointer_event(mv(30.0, 10.0), &tools);

        let InputAction::Commit(stroke) = input.handle_pointer_event(PointerEvent::Up, &tools) else {
            panic!("expected commit");
        };
        assert_eq!(
            stroke.points,
            vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(30.0, 10.0)]
        );
        assert!(input.is_idle());
    }

    #[test]
    fn test_leave_commits_like_up() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(1.0, 1.0), &tools);
        let action = input.handle_pointer_event(PointerEvent::Leave, &tools);
        assert!(matches!(action, InputAction::Commit(_)));
        assert!(input.is_idle());
    }

    #[test]
    fn test_move_and_up_while_idle_do_nothing() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        assert_eq!(input.handle_pointer_event(mv(5.0, 5.0), &tools), InputAction::None);
        assert_eq!(input.handle_pointer_event(PointerEvent::Up, &tools), InputAction::None);
        assert_eq!(input.handle_pointer_event(PointerEvent::Leave, &tools), InputAction::None);
    }

    #[test]
    fn test_eraser_down_requests_erase_and_stays_idle() {
        let mut tools = ToolState::new();
        tools.select(ToolKind::Eraser);
        let mut input = StrokeInput::new();

        let action = input.handle_pointer_event(down(42.0, 24.0), &tools);
        assert_eq!(action, InputAction::Erase(Point::new(42.0, 24.0)));
        assert!(input.is_idle());

        // Dragging with the eraser does nothing.
        assert_eq!(input.handle_pointer_event(mv(50.0, 24.0), &tools), InputAction::None);
        assert_eq!(input.handle_pointer_event(PointerEvent::Up, &tools), InputAction::None);
    }

    #[test]
    fn test_highlighter_marks_stroke() {
        let mut tools = ToolState::new();
        tools.select(ToolKind::Highlighter);
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(0.0, 0.0), &tools);

        let InputAction::Segment(segment) = input.handle_pointer_event(mv(4.0, 0.0), &tools) else {
            panic!("expected segment");
        };
        assert!(segment.is_highlighter);
        assert_eq!(segment.color, HexColor::YELLOW);
        assert!((segment.width - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_second_down_while_drawing_is_ignored() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(0.0, 0.0), &tools);
        let _ = input.handle_pointer_event(mv(1.0, 0.0), &tools);
        let id = input.current_stroke().unwrap().id.clone();

        assert_eq!(input.handle_pointer_event(down(50.0, 50.0), &tools), InputAction::None);
        let stroke = input.current_stroke().unwrap();
        assert_eq!(stroke.id, id);
        assert_eq!(stroke.len(), 2);
    }

    #[test]
    fn test_cancel_drops_stroke() {
        let tools = ToolState::new();
        let mut input = StrokeInput::new();
        let _ = input.handle_pointer_event(down(0.0, 0.0), &tools);
        input.cancel();
        assert!(input.is_idle());
        assert_eq!(input.handle_pointer_event(PointerEvent::Up, &tools), InputAction::None);
    }
}
