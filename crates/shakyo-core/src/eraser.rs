//! Whole-stroke eraser.
//!
//! A stroke is hit when any of its sampled points lies strictly closer than
//! the threshold to the probe. Distance is point-to-point, not
//! point-to-segment, so a probe landing between two widely spaced samples of
//! a fast stroke can miss it.

use crate::stroke::{Stroke, StrokeSet};
use kurbo::Point;

/// Default hit radius in canvas pixels.
pub const DEFAULT_ERASE_THRESHOLD: f64 = 20.0;

/// Proximity hit-test that removes whole strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eraser {
    pub threshold: f64,
}

impl Default for Eraser {
    fn default() -> Self {
        Self::new(DEFAULT_ERASE_THRESHOLD)
    }
}

impl Eraser {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Whether `probe` touches any sampled point of `stroke`.
    pub fn hits(&self, stroke: &Stroke, probe: Point) -> bool {
        stroke
            .points
            .iter()
            .any(|point| point.distance(probe) < self.threshold)
    }

    /// Remove every stroke hit by `probe`. Returns the number removed.
    ///
    /// Remaining strokes keep their order; a miss leaves the collection as is.
    pub fn erase(&self, strokes: &mut StrokeSet, probe: Point) -> usize {
        let removed = strokes.retain(|stroke| !self.hits(stroke, probe));
        if removed > 0 {
            log::debug!("Eraser at ({:.1}, {:.1}) removed {} stroke(s)", probe.x, probe.y, removed);
        }
        removed
    }
}
