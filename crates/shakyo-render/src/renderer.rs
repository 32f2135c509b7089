//! Paper renderer: full repaints and incremental stroke segments.

use crate::surface::Surface;
use kurbo::{BezPath, Cap, Join, Point, Rect, Stroke as StrokeStyle};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use shakyo_core::canvas::CanvasSize;
use shakyo_core::color::HexColor;
use shakyo_core::input::Segment;
use shakyo_core::stroke::{Stroke, StrokeSet};

/// Paper colors and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaperStyle {
    /// Base paper color.
    pub background: HexColor,
    /// Color of the texture stipple.
    pub texture_color: HexColor,
    pub texture_alpha: f64,
    /// Grid step between stipple candidates, in pixels.
    pub texture_step: u32,
    /// Probability that a candidate pixel gets a dot.
    pub texture_density: f64,
    pub rule_color: HexColor,
    /// Vertical distance between ruling lines.
    pub rule_pitch: u32,
    pub rule_width: f64,
    /// Opacity of highlighter strokes.
    pub highlighter_alpha: f64,
}

impl Default for PaperStyle {
    fn default() -> Self {
        Self {
            background: HexColor::new(0xf5, 0xf1, 0xe8),
            texture_color: HexColor::new(0x8b, 0x73, 0x55),
            texture_alpha: 0.1,
            texture_step: 2,
            texture_density: 0.5,
            rule_color: HexColor::new(0xd4, 0xc4, 0xa8),
            rule_pitch: 30,
            rule_width: 1.0,
            highlighter_alpha: 0.3,
        }
    }
}

impl PaperStyle {
    /// Opacity a stroke is painted with.
    pub fn stroke_alpha(&self, is_highlighter: bool) -> f64 {
        if is_highlighter { self.highlighter_alpha } else { 1.0 }
    }
}

/// What a full repaint drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Texture dots placed.
    pub noise_dots: usize,
    /// Candidate positions on the texture grid.
    pub noise_candidates: usize,
    pub rule_lines: usize,
    pub strokes_drawn: usize,
    /// Strokes with fewer than two points.
    pub strokes_skipped: usize,
}

/// Paints the paper and strokes onto a [`Surface`].
///
/// The full repaint is authoritative: it depends only on the canvas size
/// and the stroke collection (texture noise aside).
pub struct PaperRenderer {
    style: PaperStyle,
    rng: SmallRng,
}

impl Default for PaperRenderer {
    fn default() -> Self {
        Self::new(PaperStyle::default())
    }
}

impl PaperRenderer {
    /// Create a renderer with an entropy-seeded texture.
    pub fn new(style: PaperStyle) -> Self {
        Self {
            style,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a renderer whose texture is reproducible.
    pub fn with_seed(style: PaperStyle, seed: u64) -> Self {
        Self {
            style,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn style(&self) -> &PaperStyle {
        &self.style
    }

    /// Repaint everything: paper, texture, ruling, then strokes in z-order.
    pub fn render(&mut self, surface: &mut impl Surface, size: CanvasSize, strokes: &StrokeSet) -> RenderStats {
        let mut stats = RenderStats::default();
        let width = f64::from(size.width);
        let height = f64::from(size.height);

        surface.begin_frame();
        surface.set_global_alpha(1.0);
        surface.fill_rect(Rect::new(0.0, 0.0, width, height), self.style.background.into());

        let (dots, candidates) = self.render_texture(surface, size);
        stats.noise_dots = dots;
        stats.noise_candidates = candidates;
        stats.rule_lines = self.render_ruling(surface, size);

        for stroke in strokes {
            if self.render_stroke(surface, stroke) {
                stats.strokes_drawn += 1;
            } else {
                stats.strokes_skipped += 1;
            }
        }

        log::trace!(
            "Full repaint {}x{}: {} strokes, {} skipped, {} noise dots",
            size.width,
            size.height,
            stats.strokes_drawn,
            stats.strokes_skipped,
            stats.noise_dots
        );
        stats
    }

    /// Draw one segment of a stroke in progress, leaving everything else alone.
    pub fn render_segment(&self, surface: &mut impl Surface, segment: &Segment) {
        let mut path = BezPath::new();
        path.move_to(segment.from);
        path.line_to(segment.to);
        self.paint_line(surface, &path, segment.color, segment.width, segment.is_highlighter);
    }

    /// Stipple the texture. Dots are batched into a single fill.
    fn render_texture(&mut self, surface: &mut impl Surface, size: CanvasSize) -> (usize, usize) {
        let step = self.style.texture_step.max(1) as usize;
        let density = self.style.texture_density.clamp(0.0, 1.0);

        let mut path = BezPath::new();
        let mut dots = 0;
        let mut candidates = 0;
        for x in (0..size.width).step_by(step) {
            for y in (0..size.height).step_by(step) {
                candidates += 1;
                if !self.rng.gen_bool(density) {
                    continue;
                }
                let (x, y) = (f64::from(x), f64::from(y));
                path.move_to(Point::new(x, y));
                path.line_to(Point::new(x + 1.0, y));
                path.line_to(Point::new(x + 1.0, y + 1.0));
                path.line_to(Point::new(x, y + 1.0));
                path.close_path();
                dots += 1;
            }
        }

        if dots > 0 {
            surface.set_global_alpha(self.style.texture_alpha);
            surface.fill_path(&path, self.style.texture_color.into());
            surface.set_global_alpha(1.0);
        }
        (dots, candidates)
    }

    /// Horizontal rules from the top edge down to and including the bottom.
    fn render_ruling(&self, surface: &mut impl Surface, size: CanvasSize) -> usize {
        let pitch = self.style.rule_pitch.max(1) as usize;
        let width = f64::from(size.width);
        let style = StrokeStyle::new(self.style.rule_width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter);

        let mut lines = 0;
        for y in (0..=size.height).step_by(pitch) {
            let y = f64::from(y);
            let mut path = BezPath::new();
            path.move_to(Point::new(0.0, y));
            path.line_to(Point::new(width, y));
            surface.stroke_path(&path, &style, self.style.rule_color.into());
            lines += 1;
        }
        lines
    }

    /// Returns false when the stroke has too few points to draw.
    fn render_stroke(&self, surface: &mut impl Surface, stroke: &Stroke) -> bool {
        if !stroke.is_drawable() {
            return false;
        }
        self.paint_line(surface, &stroke.to_path(), stroke.color, stroke.width, stroke.is_highlighter);
        true
    }

    fn paint_line(
        &self,
        surface: &mut impl Surface,
        path: &BezPath,
        color: HexColor,
        width: f64,
        is_highlighter: bool,
    ) {
        let style = StrokeStyle::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);

        surface.set_global_alpha(self.style.stroke_alpha(is_highlighter));
        surface.stroke_path(path, &style, color.into());
        surface.set_global_alpha(1.0);
    }
}
