/// Intervue - Interview Experience Tracker (TUI Edition)
///
/// Core library providing the draft-backed experience submission form,
/// client-side draft persistence, and the platform API client.

pub mod api;
pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
