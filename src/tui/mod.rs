//! Terminal editor panel built on Ratatui.

pub mod app;
pub mod editor;
pub mod events;
pub mod handler;
pub mod ui;

pub use app::{App, DisplayOptions};
pub use handler::run_editor;
