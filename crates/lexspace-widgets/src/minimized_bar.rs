#![forbid(unsafe_code)]

//! The restore bar: one chip per minimized panel, plus restore-all.
//!
//! The bar is pure derived state — it exists exactly when the minimized
//! set is non-empty and the viewport shows it (mobile never does, since
//! mobile panels are navigated, not minimized). Chips appear in
//! canonical panel order regardless of minimize order.

use lexspace_core::{PanelId, ViewportClass};
use lexspace_state::{CommandOutcome, WorkspaceStore};

use crate::chrome::PanelStyle;

/// One restore button on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreChip {
    pub id: PanelId,
    pub label: &'static str,
    pub glyph: &'static str,
}

/// The minimized bar's render model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizedBar {
    chips: Vec<RestoreChip>,
}

impl MinimizedBar {
    /// Build the bar from store state, or `None` when it has nothing to
    /// show: empty minimized set, or a viewport class without a bar.
    #[must_use]
    pub fn from_store(store: &WorkspaceStore, viewport: ViewportClass) -> Option<Self> {
        if !viewport.shows_minimized_bar() {
            return None;
        }
        let chips: Vec<_> = store
            .minimized()
            .iter()
            .map(|&id| {
                let style = PanelStyle::of(id);
                RestoreChip {
                    id,
                    label: style.title,
                    glyph: style.glyph,
                }
            })
            .collect();
        if chips.is_empty() { None } else { Some(Self { chips }) }
    }

    /// The chips, in canonical panel order.
    #[must_use]
    pub fn chips(&self) -> &[RestoreChip] {
        &self.chips
    }

    /// Whether the restore-all affordance is rendered. A single chip
    /// already restores everything, so the extra button appears only
    /// from two chips up.
    #[must_use]
    pub fn shows_restore_all(&self) -> bool {
        self.chips.len() > 1
    }
}

/// A control activation on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAction {
    Restore(PanelId),
    RestoreAll,
}

impl BarAction {
    /// Run the action against the store.
    pub fn apply(self, store: &mut WorkspaceStore) -> CommandOutcome {
        match self {
            Self::Restore(id) => store.restore(id),
            Self::RestoreAll => store.restore_all(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lexspace_core::PanelMode;

    #[test]
    fn empty_minimized_set_has_no_bar() {
        let store = WorkspaceStore::new();
        assert_eq!(MinimizedBar::from_store(&store, ViewportClass::Desktop), None);
    }

    #[test]
    fn mobile_never_shows_the_bar() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Qa);
        assert_eq!(MinimizedBar::from_store(&store, ViewportClass::Mobile), None);
        assert!(MinimizedBar::from_store(&store, ViewportClass::Tablet).is_some());
    }

    #[test]
    fn chips_follow_canonical_order_not_minimize_order() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Qa);
        store.minimize(PanelId::Document);

        let bar = MinimizedBar::from_store(&store, ViewportClass::Desktop).unwrap();
        let ids: Vec<_> = bar.chips().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![PanelId::Document, PanelId::Qa]);
        assert_eq!(bar.chips()[0].label, "Document");
    }

    #[test]
    fn restore_all_button_needs_two_chips() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Qa);
        let bar = MinimizedBar::from_store(&store, ViewportClass::Desktop).unwrap();
        assert!(!bar.shows_restore_all());

        store.minimize(PanelId::Insights);
        let bar = MinimizedBar::from_store(&store, ViewportClass::Desktop).unwrap();
        assert!(bar.shows_restore_all());
    }

    #[test]
    fn restore_action_brings_one_panel_back() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Qa);
        store.minimize(PanelId::Insights);

        assert!(BarAction::Restore(PanelId::Qa).apply(&mut store).is_applied());
        assert_eq!(store.mode(PanelId::Qa), PanelMode::Normal);
        assert_eq!(store.mode(PanelId::Insights), PanelMode::Minimized);
    }

    #[test]
    fn restore_all_action_clears_the_bar() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Qa);
        store.minimize(PanelId::Insights);

        assert!(BarAction::RestoreAll.apply(&mut store).is_applied());
        assert_eq!(MinimizedBar::from_store(&store, ViewportClass::Desktop), None);
        assert_eq!(store.visible_panels(), PanelId::ALL.to_vec());
    }
}
