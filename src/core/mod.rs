//! Core domain and persistence logic, UI-independent.

pub mod draft;
pub mod experience;
pub mod logging;
