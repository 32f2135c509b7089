//! Display-list surface that records every drawing call.

use crate::surface::Surface;
use kurbo::{BezPath, Cap, Join, PathEl, Point, Rect, Shape, Stroke};
use peniko::Color;

/// One recorded drawing call, with the global alpha in effect when issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: [u8; 4],
        alpha: f64,
    },
    FillPath {
        /// Number of closed sub-paths (one per noise dot).
        subpaths: usize,
        bounds: Rect,
        color: [u8; 4],
        alpha: f64,
    },
    StrokePath {
        points: Vec<Point>,
        width: f64,
        /// Round caps and joins.
        round: bool,
        color: [u8; 4],
        alpha: f64,
    },
}

impl DrawCommand {
    pub fn alpha(&self) -> f64 {
        match self {
            DrawCommand::FillRect { alpha, .. }
            | DrawCommand::FillPath { alpha, .. }
            | DrawCommand::StrokePath { alpha, .. } => *alpha,
        }
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, DrawCommand::StrokePath { .. })
    }
}

/// A [`Surface`] that keeps a list of what was drawn instead of pixels.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    alpha: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            alpha: 1.0,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the alpha register.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded path strokes, in drawing order.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_stroke())
    }
}

fn rgba(color: Color) -> [u8; 4] {
    color.to_rgba8().to_u8_array()
}

fn path_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(*p),
            PathEl::ClosePath => None,
        })
        .collect()
}

impl Surface for RecordingSurface {
    /// A full repaint replaces the display list.
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: rgba(color),
            alpha: self.alpha,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let subpaths = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        self.commands.push(DrawCommand::FillPath {
            subpaths,
            bounds: path.bounding_box(),
            color: rgba(color),
            alpha: self.alpha,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        let round = style.start_cap == Cap::Round
            && style.end_cap == Cap::Round
            && style.join == Join::Round;
        self.commands.push(DrawCommand::StrokePath {
            points: path_points(path),
            width: style.width,
            round,
            color: rgba(color),
            alpha: self.alpha,
        });
    }
}
