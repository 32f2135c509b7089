//! Notebook application state.

use crate::config::AppConfig;
use crate::error::AppResult;
use kurbo::Rect;
use shakyo_core::canvas::{CanvasError, CanvasSession, CanvasSize, Redraw};
use shakyo_core::coords::{PointerInput, to_canvas};
use shakyo_core::storage::{NotePersistence, Storage};
use shakyo_core::stroke::StrokeSet;
use shakyo_core::tools::ToolKind;
use shakyo_render::{PaperRenderer, RenderStats, Surface};
use std::sync::Arc;

/// Count of paint work done on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintCounters {
    pub full_repaints: usize,
    pub segments: usize,
}

/// One open document: drawing session, renderer, surface and store.
///
/// Every redraw the session asks for is painted before the handler
/// returns. Pointer handlers do nothing until a surface is attached.
pub struct NotebookApp<St: Storage, S: Surface> {
    session: CanvasSession,
    renderer: PaperRenderer,
    persistence: NotePersistence<St>,
    surface: Option<S>,
    /// On-screen canvas rectangle, for mapping client coordinates.
    bounds: Option<Rect>,
    /// Id the document is stored under; `None` until first saved.
    document_id: Option<String>,
    group_id: Option<String>,
    /// Group the session was opened from, remembered for the note list on save.
    requested_group: Option<String>,
    counters: PaintCounters,
    last_stats: Option<RenderStats>,
}

impl<St: Storage, S: Surface> NotebookApp<St, S> {
    /// Open a document for editing, or a blank one when `edit_id` is `None`.
    pub fn open(config: &AppConfig, storage: Arc<St>, edit_id: Option<&str>, group_id: Option<&str>) -> Self {
        let persistence = NotePersistence::new(storage, &config.canvas);
        let loaded = match edit_id {
            Some(id) => persistence.load_document(id),
            None => persistence.empty_document(),
        };

        let session = CanvasSession::with_document(config.canvas.clone(), loaded.title, loaded.strokes);
        let mut app = Self::from_parts(
            session,
            PaperRenderer::new(config.paper.clone()),
            persistence,
            edit_id.map(str::to_string),
            group_id.map(str::to_string).or(loaded.group_id),
        );
        app.requested_group = group_id.map(str::to_string);
        app
    }

    fn from_parts(
        session: CanvasSession,
        renderer: PaperRenderer,
        persistence: NotePersistence<St>,
        document_id: Option<String>,
        group_id: Option<String>,
    ) -> Self {
        Self {
            session,
            renderer,
            persistence,
            surface: None,
            bounds: None,
            document_id,
            group_id,
            requested_group: None,
            counters: PaintCounters::default(),
            last_stats: None,
        }
    }

    /// Replace the renderer, e.g. with a seeded one.
    pub fn with_renderer(mut self, renderer: PaperRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn session(&self) -> &CanvasSession {
        &self.session
    }

    pub fn strokes(&self) -> &StrokeSet {
        self.session.strokes()
    }

    pub fn size(&self) -> CanvasSize {
        self.session.size()
    }

    pub fn title(&self) -> &str {
        self.session.title()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn counters(&self) -> PaintCounters {
        self.counters
    }

    /// Stats of the most recent full repaint.
    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    pub fn persistence(&self) -> &NotePersistence<St> {
        &self.persistence
    }

    /// Attach the drawing surface and paint it.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.apply(Redraw::Full);
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Set where the canvas sits on screen.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn pointer_down(&mut self, input: &PointerInput) {
        if self.surface.is_none() {
            return;
        }
        let position = to_canvas(input, self.bounds);
        let redraw = self.session.pointer_down(position);
        self.apply(redraw);
    }

    pub fn pointer_move(&mut self, input: &PointerInput) {
        if self.surface.is_none() {
            return;
        }
        let position = to_canvas(input, self.bounds);
        let redraw = self.session.pointer_move(position);
        self.apply(redraw);
    }

    pub fn pointer_up(&mut self) {
        if self.surface.is_none() {
            return;
        }
        let redraw = self.session.pointer_up();
        self.apply(redraw);
    }

    pub fn pointer_leave(&mut self) {
        if self.surface.is_none() {
            return;
        }
        let redraw = self.session.pointer_leave();
        self.apply(redraw);
    }

    /// Canvas size the session would take for a viewport.
    pub fn size_for_viewport(&self, viewport_width: f64, viewport_height: f64) -> CanvasSize {
        CanvasSize::for_viewport(viewport_width, viewport_height, self.session.config())
    }

    /// Resize the canvas and repaint.
    pub fn resize(&mut self, size: CanvasSize) {
        let redraw = self.session.resize(size);
        self.apply(redraw);
    }

    /// Resize from viewport dimensions and repaint.
    pub fn resize_to_viewport(&mut self, viewport_width: f64, viewport_height: f64) {
        let redraw = self.session.resize_to_viewport(viewport_width, viewport_height);
        self.apply(redraw);
    }

    pub fn select_tool(&mut self, tool: ToolKind) -> Result<(), CanvasError> {
        self.session.select_tool(tool)
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), CanvasError> {
        self.session.set_color_str(color)
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), CanvasError> {
        self.session.set_width(width)
    }

    pub fn clear(&mut self) {
        let redraw = self.session.clear();
        self.apply(redraw);
    }

    pub fn set_title(&mut self, title: &str) -> bool {
        self.session.set_title(title)
    }

    /// Repaint everything regardless of what changed.
    pub fn repaint(&mut self) {
        self.apply(Redraw::Full);
    }

    /// End the session: finish any open stroke and save if there is
    /// anything to save. Returns the stored id.
    pub fn close(&mut self) -> AppResult<Option<String>> {
        let redraw = self.session.pointer_leave();
        self.apply(redraw);

        if self.session.strokes().is_empty() {
            log::debug!("Nothing drawn, skipping save");
            return Ok(None);
        }

        let id = self.persistence.save_document(
            self.document_id.as_deref(),
            self.session.title(),
            self.session.strokes(),
            self.group_id.as_deref(),
        )?;
        self.document_id = Some(id.clone());

        if let Some(group) = &self.requested_group {
            if let Err(e) = self.persistence.storage().select_group(group) {
                log::warn!("Failed to remember group {}: {}", group, e);
            }
        }
        Ok(Some(id))
    }

    fn apply(&mut self, redraw: Redraw) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match redraw {
            Redraw::None => {}
            Redraw::Segment(segment) => {
                self.renderer.render_segment(surface, &segment);
                self.counters.segments += 1;
            }
            Redraw::Full => {
                let stats = self.renderer.render(surface, self.session.size(), self.session.strokes());
                self.counters.full_repaints += 1;
                self.last_stats = Some(stats);
            }
        }
    }
}
