//! Drawing surface abstraction.

use kurbo::{BezPath, Rect, Stroke};
use peniko::Color;

/// A 2D drawing target with a global opacity register.
///
/// Mirrors an immediate-mode canvas: `global_alpha` multiplies every fill
/// and stroke issued while it is set, and stays set until changed.
pub trait Surface {
    /// Called before a full repaint; surfaces that accumulate drawing
    /// (scene encoders, display lists) discard the previous frame here.
    fn begin_frame(&mut self) {}

    /// Set the opacity applied to subsequent drawing (0.0..=1.0).
    fn set_global_alpha(&mut self, alpha: f64);

    /// Current global opacity.
    fn global_alpha(&self) -> f64;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a path with the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a path outline.
    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color);
}
