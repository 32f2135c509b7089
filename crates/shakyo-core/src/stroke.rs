//! Freehand strokes and the ordered stroke collection.

use crate::color::HexColor;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a stroke within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(String);

impl StrokeId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for StrokeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pen-down-to-pen-up drawing action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: StrokeId,
    /// Canvas-local points in drawing order.
    pub points: Vec<Point>,
    pub color: HexColor,
    pub width: f64,
    /// Highlighter strokes paint translucent.
    #[serde(default)]
    pub is_highlighter: bool,
}

impl Stroke {
    /// Start a new stroke at `origin`.
    pub fn begin(origin: Point, color: HexColor, width: f64, is_highlighter: bool) -> Self {
        Self {
            id: StrokeId::new(),
            points: vec![origin],
            color,
            width,
            is_highlighter,
        }
    }

    /// Return this stroke with `point` appended.
    #[must_use]
    pub fn with_point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the width is usable for painting: finite and positive.
    pub fn has_valid_width(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }

    /// Whether the stroke renders as a line (needs at least two points).
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Axis-aligned bounds of the sampled points (ignores line width).
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Poly-line through all points.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }

        path
    }
}

/// Committed strokes in z-order (later strokes paint on top).
///
/// Mutated only by appending a committed stroke, by filtered removal, or by
/// clearing; strokes are never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Stroke>", into = "Vec<Stroke>")]
pub struct StrokeSet {
    strokes: Vec<Stroke>,
}

impl StrokeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from stored strokes.
    ///
    /// Strokes without points or with an unusable width are dropped, and
    /// duplicate ids are replaced so every id stays unique.
    pub fn from_strokes(strokes: impl IntoIterator<Item = Stroke>) -> Self {
        let mut set = Self::new();
        for stroke in strokes {
            if stroke.is_empty() {
                log::warn!("Dropping stroke {} with no points", stroke.id);
                continue;
            }
            if !stroke.has_valid_width() {
                log::warn!("Dropping stroke {} with width {}", stroke.id, stroke.width);
                continue;
            }
            set.commit(stroke);
        }
        set
    }

    /// Append a finished stroke on top of all others.
    pub fn commit(&mut self, mut stroke: Stroke) {
        if self.contains(&stroke.id) {
            let fresh = StrokeId::new();
            log::warn!("Duplicate stroke id {}, reassigning to {}", stroke.id, fresh);
            stroke.id = fresh;
        }
        self.strokes.push(stroke);
    }

    /// Keep only strokes matching `keep`, preserving order. Returns how many were removed.
    pub fn retain(&mut self, keep: impl FnMut(&Stroke) -> bool) -> usize {
        let before = self.strokes.len();
        self.strokes.retain(keep);
        before - self.strokes.len()
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn contains(&self, id: &StrokeId) -> bool {
        self.strokes.iter().any(|s| &s.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Stroke> {
        self.strokes.get(index)
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// Strokes back to front.
    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Union of all stroke bounds, if any strokes exist.
    pub fn bounds(&self) -> Option<Rect> {
        self.strokes
            .iter()
            .map(Stroke::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Ids of all strokes, useful for checking uniqueness.
    pub fn ids(&self) -> HashSet<&StrokeId> {
        self.strokes.iter().map(|s| &s.id).collect()
    }

    pub fn into_vec(self) -> Vec<Stroke> {
        self.strokes
    }
}

impl From<Vec<Stroke>> for StrokeSet {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self::from_strokes(strokes)
    }
}

impl From<StrokeSet> for Vec<Stroke> {
    fn from(set: StrokeSet) -> Self {
        set.strokes
    }
}

impl<'a> IntoIterator for &'a StrokeSet {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
