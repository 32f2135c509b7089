//! Mapping raw mouse/touch positions into canvas-local coordinates.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A raw pointer sample as delivered by the host event system.
///
/// Positions are in client (viewport) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    /// Mouse event with a single client position.
    Mouse { client: Point },
    /// Touch event carrying every active touch point, in host order.
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse { client: Point::new(x, y) }
    }

    pub fn touch(touches: Vec<Point>) -> Self {
        Self::Touch { touches }
    }

    /// The client position that drives drawing. Multi-touch uses the first touch only.
    pub fn client_position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { client } => Some(*client),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Map a pointer sample into canvas-local space.
///
/// `bounds` is the canvas' on-screen bounding rectangle. When it is unknown
/// (surface not mounted) or the touch list is empty, the origin is returned.
pub fn to_canvas(input: &PointerInput, bounds: Option<Rect>) -> Point {
    match (bounds, input.client_position()) {
        (Some(rect), Some(client)) => Point::new(client.x - rect.x0, client.y - rect.y0),
        _ => Point::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_offset_by_bounds() {
        let bounds = Rect::new(50.0, 100.0, 850.0, 700.0);
        let point = to_canvas(&PointerInput::mouse(60.0, 130.0), Some(bounds));
        assert_eq!(point, Point::new(10.0, 30.0));
    }

    #[test]
    fn test_touch_uses_first_touch() {
        let bounds = Rect::new(10.0, 10.0, 410.0, 310.0);
        let input = PointerInput::touch(vec![Point::new(20.0, 25.0), Point::new(300.0, 200.0)]);
        assert_eq!(to_canvas(&input, Some(bounds)), Point::new(10.0, 15.0));
    }

    #[test]
    fn test_missing_bounds_yields_origin() {
        assert_eq!(to_canvas(&PointerInput::mouse(60.0, 130.0), None), Point::ZERO);
    }

    #[test]
    fn test_empty_touch_list_yields_origin() {
        let bounds = Rect::new(10.0, 10.0, 410.0, 310.0);
        assert_eq!(to_canvas(&PointerInput::touch(Vec::new()), Some(bounds)), Point::ZERO);
    }

    #[test]
    fn test_position_outside_bounds_is_not_clamped() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 200.0);
        let point = to_canvas(&PointerInput::mouse(90.0, 250.0), Some(bounds));
        assert_eq!(point, Point::new(-10.0, 150.0));
    }
}
