#![forbid(unsafe_code)]

//! Viewport classification against responsive breakpoints.
//!
//! [`ViewportClass`] is derived state: it is recomputed from the window
//! width on every resize event and never persisted. Classification only
//! changes *how* the current layout state is rendered — it never mutates
//! panel modes or widths.
//!
//! # Invariants
//!
//! 1. `classify_width` is total: every width maps to exactly one class.
//! 2. Thresholds are lower bounds: `width >= desktop_min` is desktop,
//!    else `width >= tablet_min` is tablet, else mobile.

use std::fmt;

/// Responsive breakpoint category driving layout arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViewportClass {
    /// Below the tablet threshold: one panel at a time, no dividers.
    Mobile,
    /// Between tablet and desktop thresholds: 2-up plus stacked row.
    Tablet,
    /// At or above the desktop threshold: all visible panels side by side.
    Desktop,
}

impl ViewportClass {
    /// Whether this class ever renders draggable dividers.
    #[must_use]
    pub const fn supports_resize(self) -> bool {
        matches!(self, Self::Desktop)
    }

    /// Whether the minimized bar is shown at this class.
    ///
    /// Mobile never shows it: there is nothing to minimize distinctly
    /// from "not currently active".
    #[must_use]
    pub const fn shows_minimized_bar(self) -> bool {
        !matches!(self, Self::Mobile)
    }

    /// Short label for logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Width thresholds (pixels) separating viewport classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    tablet_min: u32,
    desktop_min: u32,
}

impl Breakpoints {
    /// Conventional web thresholds: tablet at 768px, desktop at 1024px.
    pub const DEFAULT: Self = Self {
        tablet_min: 768,
        desktop_min: 1024,
    };

    /// Create custom thresholds. Swapped arguments are reordered so the
    /// tablet threshold is always the smaller one.
    #[must_use]
    pub const fn new(tablet_min: u32, desktop_min: u32) -> Self {
        if tablet_min <= desktop_min {
            Self {
                tablet_min,
                desktop_min,
            }
        } else {
            Self {
                tablet_min: desktop_min,
                desktop_min: tablet_min,
            }
        }
    }

    /// Classify a viewport width into a [`ViewportClass`].
    #[must_use]
    pub const fn classify_width(self, width: u32) -> ViewportClass {
        if width >= self.desktop_min {
            ViewportClass::Desktop
        } else if width >= self.tablet_min {
            ViewportClass::Tablet
        } else {
            ViewportClass::Mobile
        }
    }

    /// Check whether a width change crosses a class boundary.
    ///
    /// Returns `Some((old, new))` on a transition, `None` otherwise.
    #[must_use]
    pub const fn detect_transition(
        self,
        old_width: u32,
        new_width: u32,
    ) -> Option<(ViewportClass, ViewportClass)> {
        let old = self.classify_width(old_width);
        let new = self.classify_width(new_width);
        if old as u8 != new as u8 {
            Some((old, new))
        } else {
            None
        }
    }

    /// Lower bound of the tablet class.
    #[must_use]
    pub const fn tablet_min(self) -> u32 {
        self.tablet_min
    }

    /// Lower bound of the desktop class.
    #[must_use]
    pub const fn desktop_min(self) -> u32 {
        self.desktop_min
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let bp = Breakpoints::DEFAULT;
        assert_eq!(bp.classify_width(0), ViewportClass::Mobile);
        assert_eq!(bp.classify_width(767), ViewportClass::Mobile);
        assert_eq!(bp.classify_width(768), ViewportClass::Tablet);
        assert_eq!(bp.classify_width(1023), ViewportClass::Tablet);
        assert_eq!(bp.classify_width(1024), ViewportClass::Desktop);
        assert_eq!(bp.classify_width(3840), ViewportClass::Desktop);
    }

    #[test]
    fn custom_thresholds() {
        let bp = Breakpoints::new(600, 900);
        assert_eq!(bp.classify_width(599), ViewportClass::Mobile);
        assert_eq!(bp.classify_width(600), ViewportClass::Tablet);
        assert_eq!(bp.classify_width(900), ViewportClass::Desktop);
    }

    #[test]
    fn swapped_thresholds_are_reordered() {
        let bp = Breakpoints::new(1024, 768);
        assert_eq!(bp.tablet_min(), 768);
        assert_eq!(bp.desktop_min(), 1024);
    }

    #[test]
    fn transition_detection() {
        let bp = Breakpoints::DEFAULT;
        assert_eq!(
            bp.detect_transition(1200, 500),
            Some((ViewportClass::Desktop, ViewportClass::Mobile))
        );
        assert_eq!(bp.detect_transition(800, 900), None);
    }

    #[test]
    fn only_desktop_supports_resize() {
        assert!(ViewportClass::Desktop.supports_resize());
        assert!(!ViewportClass::Tablet.supports_resize());
        assert!(!ViewportClass::Mobile.supports_resize());
    }

    #[test]
    fn minimized_bar_hidden_on_mobile() {
        assert!(!ViewportClass::Mobile.shows_minimized_bar());
        assert!(ViewportClass::Tablet.shows_minimized_bar());
        assert!(ViewportClass::Desktop.shows_minimized_bar());
    }

    #[test]
    fn class_ordering() {
        assert!(ViewportClass::Mobile < ViewportClass::Tablet);
        assert!(ViewportClass::Tablet < ViewportClass::Desktop);
    }
}
