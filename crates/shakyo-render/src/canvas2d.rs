//! Browser `<canvas>` 2D context surface.

use crate::surface::Surface;
use kurbo::{BezPath, Cap, Join, PathEl, Rect, Stroke};
use peniko::Color;
use web_sys::CanvasRenderingContext2d;

/// Draws straight into a `CanvasRenderingContext2d`.
pub struct Canvas2dSurface {
    context: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }

    fn trace(&self, path: &BezPath) {
        let ctx = &self.context;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("rgba({}, {}, {}, {:.3})", rgba.r, rgba.g, rgba.b, f64::from(rgba.a) / 255.0)
    }
}

fn cap_name(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn join_name(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

impl Surface for Canvas2dSurface {
    fn set_global_alpha(&mut self, alpha: f64) {
        self.context.set_global_alpha(alpha);
    }

    fn global_alpha(&self) -> f64 {
        self.context.global_alpha()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.context.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.trace(path);
        self.context.fill();
    }

    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(style.width);
        self.context.set_line_cap(cap_name(style.start_cap));
        self.context.set_line_join(join_name(style.join));
        self.trace(path);
        self.context.stroke();
    }
}
