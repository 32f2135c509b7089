//! WebAssembly entry point: binds a notebook to a `<canvas>` element.

use crate::app::NotebookApp;
use crate::config::AppConfig;
use kurbo::{Point, Rect};
use shakyo_core::coords::PointerInput;
use shakyo_core::storage::LocalStorage;
use shakyo_core::tools::ToolKind;
use shakyo_render::Canvas2dSurface;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("No window object"))
}

fn touch_points(event: &TouchEvent) -> Vec<Point> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

fn mouse_input(event: &MouseEvent) -> PointerInput {
    PointerInput::mouse(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// A note canvas in the page, backed by `localStorage`.
#[wasm_bindgen]
pub struct WebNotebook {
    app: NotebookApp<LocalStorage, Canvas2dSurface>,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl WebNotebook {
    /// Bind to the canvas with id `canvas_id` and open `edit_id`, or a new
    /// note filed under `group_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, edit_id: Option<String>, group_id: Option<String>) -> Result<WebNotebook, JsValue> {
        let window = window()?;
        let document = window.document().ok_or_else(|| js_error("No document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("No element #{}", canvas_id)))?
            .dyn_into()
            .map_err(|_| js_error(format!("#{} is not a canvas", canvas_id)))?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2D context unavailable"))?
            .dyn_into()
            .map_err(|_| js_error("Unexpected context type"))?;

        let storage = Arc::new(LocalStorage::new().map_err(js_error)?);
        let app = NotebookApp::open(&AppConfig::default(), storage, edit_id.as_deref(), group_id.as_deref());

        let mut notebook = WebNotebook { app, canvas };
        notebook.fit_to_window(&window)?;
        notebook.app.attach_surface(Canvas2dSurface::new(context));
        log::info!("Notebook bound to #{}", canvas_id);
        Ok(notebook)
    }

    /// Recompute the canvas size from the window and repaint.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let window = window()?;
        self.fit_to_window(&window)
    }

    pub fn on_mouse_down(&mut self, event: &MouseEvent) {
        self.refresh_bounds();
        self.app.pointer_down(&mouse_input(event));
    }

    pub fn on_mouse_move(&mut self, event: &MouseEvent) {
        self.refresh_bounds();
        self.app.pointer_move(&mouse_input(event));
    }

    pub fn on_mouse_up(&mut self) {
        self.app.pointer_up();
    }

    pub fn on_mouse_leave(&mut self) {
        self.app.pointer_leave();
    }

    pub fn on_touch_start(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.refresh_bounds();
        self.app.pointer_down(&PointerInput::touch(touch_points(event)));
    }

    pub fn on_touch_move(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.refresh_bounds();
        self.app.pointer_move(&PointerInput::touch(touch_points(event)));
    }

    pub fn on_touch_end(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.app.pointer_up();
    }

    /// Select `pen`, `highlighter` or `eraser`.
    pub fn select_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let tool: ToolKind = tool.parse().map_err(js_error)?;
        self.app.select_tool(tool).map_err(js_error)
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.app.set_color(color).map_err(js_error)
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), JsValue> {
        self.app.set_width(width).map_err(js_error)
    }

    pub fn clear(&mut self) {
        self.app.clear();
    }

    pub fn title(&self) -> String {
        self.app.title().to_string()
    }

    pub fn set_title(&mut self, title: &str) -> bool {
        self.app.set_title(title)
    }

    pub fn stroke_count(&self) -> usize {
        self.app.strokes().len()
    }

    /// Save the note, returning the id it is stored under.
    pub fn close(&mut self) -> Result<Option<String>, JsValue> {
        self.app.close().map_err(js_error)
    }
}

impl WebNotebook {
    fn fit_to_window(&mut self, window: &Window) -> Result<(), JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or_default();
        let height = window.inner_height()?.as_f64().unwrap_or_default();
        let size = self.app.size_for_viewport(width, height);

        // Setting the element size clears it; resizing the app repaints.
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.app.resize(size);
        Ok(())
    }

    fn refresh_bounds(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.app
            .set_bounds(Some(Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())));
    }
}

/// Initialize logging for the WASM module.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Shakyo (WASM)");
}
