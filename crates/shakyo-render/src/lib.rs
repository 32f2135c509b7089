//! Shakyo Render Library
//!
//! Paints the ruled paper and ink strokes onto a drawing surface.
//! Surfaces exist for the browser canvas, for Vello scenes and for
//! recording display lists.

mod recording;
mod renderer;
mod surface;

#[cfg(target_arch = "wasm32")]
mod canvas2d;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{PaperRenderer, PaperStyle, RenderStats};
pub use surface::Surface;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloSurface;
