#![forbid(unsafe_code)]

//! Panel identity and visibility modes.
//!
//! [`PanelId`] is a closed set: the workspace always deals with the same
//! three content regions. The set is closed at compile time so that every
//! lookup keyed by panel (styling, labels, width entries) is an exhaustive
//! `match` — adding a fourth panel is a compile-checked change, not a
//! silently-ignored default branch.
//!
//! # Invariants
//!
//! 1. Canonical order is declaration order: `Document < Insights < Qa`.
//! 2. `PanelId::ALL` lists every variant exactly once, in canonical order.
//! 3. At most one panel is [`PanelMode::Expanded`] at a time (enforced by
//!    the state store, not by this type).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed workspace content regions.
///
/// Serialized as snake_case strings (`"document"`, `"insights"`, `"qa"`)
/// so persisted layout records stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// The source document under review.
    Document,
    /// AI-generated insights about the document.
    Insights,
    /// Question-and-answer thread.
    Qa,
}

impl PanelId {
    /// Every panel, in canonical render order.
    pub const ALL: [Self; 3] = [Self::Document, Self::Insights, Self::Qa];

    /// Number of panels in the closed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Human-readable label for chips, titles, and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Insights => "AI Insights",
            Self::Qa => "Q&A",
        }
    }

    /// Stable machine-readable key (matches the serde representation).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Insights => "insights",
            Self::Qa => "qa",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Visibility mode of a single panel.
///
/// Not persisted: the state store derives each panel's mode from the
/// expanded slot and the minimized set, and fullscreen is a transient
/// view rather than a saved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// Rendered in the main area, participating in the width map.
    #[default]
    Normal,
    /// Rendered alone, fullscreen within the workspace area.
    Expanded,
    /// Hidden from the main area, represented only by a restore chip.
    Minimized,
}

impl PanelMode {
    /// Whether a panel in this mode occupies main-area width.
    #[must_use]
    pub const fn occupies_width(self) -> bool {
        matches!(self, Self::Normal)
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Expanded => "expanded",
            Self::Minimized => "minimized",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
