#![forbid(unsafe_code)]

//! View models for the workspace chrome: panel headers and the
//! minimized-restore bar.
//!
//! Nothing here draws. These types compute *what* to render — titles,
//! glyphs, accent colors, which control buttons exist — from store state,
//! and map control activations back to store commands. The host renderer
//! (DOM, TUI, anything) consumes them as plain data.

pub mod chrome;
pub mod minimized_bar;

pub use chrome::{PanelChrome, PanelIntent, PanelStyle, Rgb};
pub use minimized_bar::{BarAction, MinimizedBar, RestoreChip};
