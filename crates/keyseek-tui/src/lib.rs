//! Terminal UI for keyseek.

pub mod action;
pub mod app;
pub mod clipboard;
pub mod components;
pub mod event;
pub mod theme;

pub use app::App;
