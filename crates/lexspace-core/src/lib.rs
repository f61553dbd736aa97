#![forbid(unsafe_code)]

//! Core vocabulary for the Lexspace workspace: panel identity and modes,
//! raw input events, viewport classification, and the color-scheme signal.
//!
//! This crate is dependency-light by design. Layout math lives in
//! `lexspace-layout`, the authoritative state machine in `lexspace-state`.

pub mod color_scheme;
pub mod event;
pub mod panel;
pub mod viewport;

pub use color_scheme::{ColorScheme, ColorSchemeSignal, SchemeSubscription};
pub use event::{Modifiers, PointerEvent, PointerKind, PointerPhase, ResizeKey, TouchId};
pub use panel::{PanelId, PanelMode};
pub use viewport::{Breakpoints, ViewportClass};
