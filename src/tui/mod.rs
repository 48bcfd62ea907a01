//! Terminal user interface: Elm-style event loop, views, and theme.

pub mod app;
pub mod events;
pub mod services;
pub mod theme;
pub mod views;
