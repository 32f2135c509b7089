//! Vello scene surface.

use crate::surface::Surface;
use kurbo::{Affine, BezPath, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Encodes drawing calls into a Vello [`Scene`] for GPU rendering.
///
/// Global alpha is folded into each brush color since a scene has no
/// opacity register.
pub struct VelloSurface {
    /// The Vello scene being built.
    scene: Scene,
    /// Applied to every encoded shape, e.g. a HiDPI scale.
    transform: Affine,
    alpha: f64,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            alpha: 1.0,
        }
    }

    /// Scale every shape by the device pixel ratio.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.transform = Affine::scale(scale_factor);
        self
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn brush(&self, color: Color) -> Color {
        color.multiply_alpha(self.alpha as f32)
    }
}

impl Surface for VelloSurface {
    fn begin_frame(&mut self) {
        self.scene.reset();
        self.alpha = 1.0;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let brush = self.brush(color);
        self.scene.fill(Fill::NonZero, self.transform, brush, None, &rect);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let brush = self.brush(color);
        self.scene.fill(Fill::NonZero, self.transform, brush, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        let brush = self.brush(color);
        self.scene.stroke(style, self.transform, brush, None, path);
    }
}
