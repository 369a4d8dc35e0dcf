//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Patient attribute entry
//! - Risk prediction display

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
