#![forbid(unsafe_code)]

//! Per-panel header chrome: identity styling and the mode buttons.
//!
//! Styling is resolved by exhaustive match on [`PanelId`], so adding a
//! panel variant fails compilation until its style exists — there is no
//! string-keyed table to fall out of sync with the enum.

use std::fmt;

use lexspace_core::{ColorScheme, PanelId, PanelMode};
use lexspace_state::{CommandOutcome, WorkspaceStore};

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Static identity styling for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    pub title: &'static str,
    pub glyph: &'static str,
    accent_light: Rgb,
    accent_dark: Rgb,
}

impl PanelStyle {
    /// The style for a panel. Exhaustive over [`PanelId`].
    #[must_use]
    pub const fn of(id: PanelId) -> Self {
        match id {
            PanelId::Document => Self {
                title: "Document",
                glyph: "📄",
                accent_light: Rgb::new(0x1d, 0x4e, 0xd8),
                accent_dark: Rgb::new(0x60, 0xa5, 0xfa),
            },
            PanelId::Insights => Self {
                title: "AI Insights",
                glyph: "💡",
                accent_light: Rgb::new(0x7c, 0x3a, 0xed),
                accent_dark: Rgb::new(0xa7, 0x8b, 0xfa),
            },
            PanelId::Qa => Self {
                title: "Q&A",
                glyph: "💬",
                accent_light: Rgb::new(0x04, 0x78, 0x57),
                accent_dark: Rgb::new(0x34, 0xd3, 0x99),
            },
        }
    }

    /// Accent color under a color scheme.
    #[must_use]
    pub const fn accent(&self, scheme: ColorScheme) -> Rgb {
        match scheme {
            ColorScheme::Light => self.accent_light,
            ColorScheme::Dark => self.accent_dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Header view model
// ---------------------------------------------------------------------------

/// A control activation on a panel header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    /// Toggle fullscreen for this panel.
    Expand,
    /// Send this panel to the minimized bar.
    Minimize,
}

impl PanelIntent {
    /// Run the intent against the store.
    pub fn apply(self, id: PanelId, store: &mut WorkspaceStore) -> CommandOutcome {
        match self {
            Self::Expand => store.expand(id),
            Self::Minimize => store.minimize(id),
        }
    }
}

/// What one panel header renders right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChrome {
    pub id: PanelId,
    pub style: PanelStyle,
    pub mode: PanelMode,
}

impl PanelChrome {
    /// Build the header model for a panel from store state.
    #[must_use]
    pub fn from_store(id: PanelId, store: &WorkspaceStore) -> Self {
        Self {
            id,
            style: PanelStyle::of(id),
            mode: store.mode(id),
        }
    }

    /// Label for the expand toggle, reflecting its current direction.
    #[must_use]
    pub fn expand_label(&self) -> &'static str {
        match self.mode {
            PanelMode::Expanded => "Exit fullscreen",
            PanelMode::Normal | PanelMode::Minimized => "Expand",
        }
    }

    /// Whether the minimize button is rendered. An expanded panel offers
    /// only the fullscreen exit.
    #[must_use]
    pub fn shows_minimize(&self) -> bool {
        self.mode != PanelMode::Expanded
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
