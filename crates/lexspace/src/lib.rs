#![forbid(unsafe_code)]

//! Lexspace public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for hosts
//! embedding the workspace layout engine. It re-exports common types
//! from internal crates and offers a lightweight prelude for day-to-day
//! usage.

// --- Core re-exports -------------------------------------------------------

pub use lexspace_core::{
    Breakpoints, ColorScheme, ColorSchemeSignal, Modifiers, PanelId, PanelMode, PointerEvent,
    PointerKind, PointerPhase, ResizeKey, TouchId, ViewportClass,
};

// --- Layout re-exports -----------------------------------------------------

pub use lexspace_layout::{
    LayoutPlan, MAX_WIDTH_PCT, MIN_WIDTH_PCT, PanelWidths, SUM_EPSILON, WidthError, WidthLimits,
    resolve_widths, select_layout,
};

// --- State re-exports ------------------------------------------------------

pub use lexspace_state::{
    CommandOutcome, DocumentToken, FileStorage, LAYOUT_SNAPSHOT_SCHEMA_VERSION, LayoutSnapshot,
    MemoryStorage, RejectReason, StorageBackend, StorageError, StorageResult, WorkspaceSession,
    WorkspaceStore, WorkspaceView,
};

// --- Input re-exports ------------------------------------------------------

pub use lexspace_input::{DragController, DragRejection, KEY_STEP_LARGE_PCT, KEY_STEP_PCT};

// --- Widget re-exports -----------------------------------------------------

pub use lexspace_widgets::{BarAction, MinimizedBar, PanelChrome, PanelIntent, PanelStyle, Rgb};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Breakpoints, CommandOutcome, DocumentToken, DragController, LayoutPlan, MinimizedBar,
        PanelChrome, PanelId, PanelMode, PanelWidths, PointerEvent, PointerPhase, ViewportClass,
        WorkspaceSession, WorkspaceStore, WorkspaceView,
    };

    pub use crate::{core, input, layout, state, widgets};
}

pub use lexspace_core as core;
pub use lexspace_input as input;
pub use lexspace_layout as layout;
pub use lexspace_state as state;
pub use lexspace_widgets as widgets;
