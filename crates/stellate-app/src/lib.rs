//! Stellate Application
//!
//! Native host for the rating control: window, GPU surface, egui
//! integration, and the title bar that mirrors the current rating.

mod app;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use ui::{rating_title, render_ui};
