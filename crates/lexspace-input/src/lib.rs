#![forbid(unsafe_code)]

//! Divider interaction for Lexspace: pointer drags and keyboard nudges.
//!
//! The [`DragController`] translates raw pointer and key events into
//! width commands on a [`lexspace_state::WorkspaceStore`]. It owns the
//! per-drag session state (anchor position, starting widths, captured
//! touch) and guarantees that every drag tears down exactly once no
//! matter how it ends.

pub mod drag;

pub use drag::{DragController, DragRejection, KEY_STEP_PCT, KEY_STEP_LARGE_PCT};
