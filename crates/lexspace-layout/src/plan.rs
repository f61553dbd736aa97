#![forbid(unsafe_code)]

//! Responsive layout selection: viewport class + visible panels → plan.
//!
//! [`select_layout`] is a pure mapping. It never mutates panel modes or
//! widths: switching from desktop to mobile changes only *how* the same
//! logical state is rendered. The caller re-runs it whenever the
//! viewport class, visible set, or widths change.
//!
//! # Invariants
//!
//! 1. Pure: identical inputs produce identical plans.
//! 2. The plan renders only panels from the visible set, in its order.
//! 3. Dividers appear only in desktop column plans with two or more
//!    panels — tablet and mobile never support manual resize.
//! 4. Mobile renders exactly one panel regardless of the visible set.

use lexspace_core::{PanelId, ViewportClass};

use crate::widths::PanelWidths;

/// The structural arrangement to render for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPlan {
    /// Mobile: a single active panel fills the workspace.
    Single { active: PanelId },
    /// Tablet with three visible panels: two side by side, third
    /// full-width below. No dividers.
    Stacked {
        row: [PanelId; 2],
        row_widths: PanelWidths,
        below: PanelId,
    },
    /// Panels side by side. `dividers` lists the draggable boundary
    /// indices (divider `i` between `panels[i]` and `panels[i + 1]`);
    /// empty when resize is unsupported.
    Columns {
        panels: Vec<PanelId>,
        widths: PanelWidths,
        dividers: Vec<usize>,
    },
}

impl LayoutPlan {
    /// Panels this plan renders, in render order.
    #[must_use]
    pub fn panels(&self) -> Vec<PanelId> {
        match self {
            Self::Single { active } => vec![*active],
            Self::Stacked { row, below, .. } => vec![row[0], row[1], *below],
            Self::Columns { panels, .. } => panels.clone(),
        }
    }

    /// Number of draggable dividers in this plan.
    #[must_use]
    pub fn divider_count(&self) -> usize {
        match self {
            Self::Columns { dividers, .. } => dividers.len(),
            _ => 0,
        }
    }

    /// Whether this plan supports manual resize.
    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.divider_count() > 0
    }
}

/// Decide the structural arrangement for a viewport class.
///
/// `visible` is the store's visible-panel query result (canonical order,
/// never empty); `widths` the full width map, normalized here over
/// whatever subset each arrangement renders side by side.
/// `active_mobile` is the independent mobile panel selection — it is
/// clamped to the visible set, falling back to the first visible panel.
#[must_use]
pub fn select_layout(
    viewport: ViewportClass,
    visible: &[PanelId],
    widths: &PanelWidths,
    active_mobile: Option<PanelId>,
) -> LayoutPlan {
    // The store guarantees a non-empty visible set; degrade to the
    // document panel rather than panicking if a caller bypasses it.
    let Some(&first) = visible.first() else {
        return LayoutPlan::Single {
            active: PanelId::Document,
        };
    };

    match viewport {
        ViewportClass::Mobile => {
            let active = active_mobile
                .filter(|a| visible.contains(a))
                .unwrap_or(first);
            LayoutPlan::Single { active }
        }
        ViewportClass::Tablet => {
            if visible.len() == 3 {
                let row = [visible[0], visible[1]];
                LayoutPlan::Stacked {
                    row_widths: widths.normalized(&row),
                    row,
                    below: visible[2],
                }
            } else {
                LayoutPlan::Columns {
                    panels: visible.to_vec(),
                    widths: widths.normalized(visible),
                    dividers: Vec::new(),
                }
            }
        }
        ViewportClass::Desktop => {
            let dividers = if visible.len() > 1 {
                (0..visible.len() - 1).collect()
            } else {
                Vec::new()
            };
            LayoutPlan::Columns {
                panels: visible.to_vec(),
                widths: widths.normalized(visible),
                dividers,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
