//! Shakyo Application
//!
//! The application shell tying the drawing session, the paper renderer and
//! document storage together, for the browser and the command line.

mod app;
mod config;
mod error;
pub mod report;
pub mod script;

pub use app::{NotebookApp, PaintCounters};
pub use config::{AppConfig, DEFAULT_CONFIG_NAME};
pub use error::{AppError, AppResult};
pub use script::{ReplaySummary, ScriptStep, load_script, replay};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebNotebook;
