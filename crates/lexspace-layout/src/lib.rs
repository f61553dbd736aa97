#![forbid(unsafe_code)]

//! Layout math for the Lexspace workspace.
//!
//! Two pure pieces live here: the width-map geometry solver
//! ([`resolve_widths`]) that turns divider drags into constraint-satisfying
//! width distributions, and the responsive selector ([`select_layout`]) that
//! maps a viewport class plus the visible panel set to a [`LayoutPlan`].
//! Neither holds state and neither knows about panel modes — the state
//! store in `lexspace-state` is the only writer of layout state.

pub mod plan;
pub mod widths;

pub use plan::{LayoutPlan, select_layout};
pub use widths::{
    MAX_WIDTH_PCT, MIN_WIDTH_PCT, PanelWidths, SUM_EPSILON, WidthError, WidthLimits,
    resolve_widths,
};
