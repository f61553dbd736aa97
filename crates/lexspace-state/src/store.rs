#![forbid(unsafe_code)]

//! The panel state machine: visibility commands and derived queries.
//!
//! # State Machine
//!
//! Each panel independently cycles `normal ⇄ minimized` and
//! `normal ⇄ expanded`, under two global constraints:
//!
//! - Expansion is exclusive: at most one panel is expanded.
//! - At least one panel is always visible: a minimize that would hide
//!   every panel is rejected.
//!
//! There is no direct `expanded ⇄ minimized` transition; expanding clears
//! the minimized set (restore-then-expand), and expanding the already
//! expanded panel collapses it back to normal (toggle semantics).
//!
//! # Invariants
//!
//! 1. The full width map always sums to 100 over all panels; minimizing
//!    or expanding never mutates widths, it only excludes panels from the
//!    rendering-width accounting. [`WorkspaceStore::normalized_widths`]
//!    rescales over the visible set.
//! 2. [`WorkspaceStore::visible_panels`] never returns an empty list.
//! 3. Commands are atomic: a rejected command leaves state untouched.
//!
//! # Failure Modes
//!
//! Nothing here is fatal. Invalid commands return
//! [`CommandOutcome::Rejected`] without mutating; persistence failures
//! are logged at `warn` and swallowed — in-memory state stays
//! authoritative and the next mutation retries naturally.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use lexspace_core::{PanelId, PanelMode};
use lexspace_layout::{PanelWidths, WidthError, WidthLimits};

use crate::persist::StorageBackend;
use crate::snapshot::LayoutSnapshot;

// ---------------------------------------------------------------------------
// Command results
// ---------------------------------------------------------------------------

/// Result of a store command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// State changed and a persistence write was attempted.
    Applied,
    /// The command was a no-op (already in the requested state).
    Ignored,
    /// The command would violate an invariant and was dropped whole.
    Rejected(RejectReason),
}

impl CommandOutcome {
    /// Whether the command mutated state.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Minimizing this panel would leave zero visible panels.
    WouldHideAllPanels,
    /// The width map handed to `set_widths` fails validation.
    InvalidWidths(WidthError),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldHideAllPanels => f.write_str("would leave zero visible panels"),
            Self::InvalidWidths(e) => write!(f, "invalid widths: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The authoritative workspace layout state.
///
/// Constructed once per workspace session and passed by handle to the
/// components that need it — there is no ambient global instance.
pub struct WorkspaceStore {
    /// Full width map; sums to 100 over all panels at all times.
    widths: PanelWidths,
    minimized: BTreeSet<PanelId>,
    expanded: Option<PanelId>,
    limits: WidthLimits,
    storage: Option<Arc<dyn StorageBackend>>,
}

impl fmt::Debug for WorkspaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceStore")
            .field("widths", &self.widths)
            .field("minimized", &self.minimized)
            .field("expanded", &self.expanded)
            .field("has_storage", &self.storage.is_some())
            .finish()
    }
}

impl WorkspaceStore {
    /// Fresh store: all panels normal, equal widths, no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(WidthLimits::DEFAULT)
    }

    /// Fresh store with custom width bounds.
    #[must_use]
    pub fn with_limits(limits: WidthLimits) -> Self {
        Self {
            widths: PanelWidths::equal_split(&PanelId::ALL),
            minimized: BTreeSet::new(),
            expanded: None,
            limits,
            storage: None,
        }
    }

    /// Attach a storage backend and restore whatever it holds.
    ///
    /// Malformed or missing persisted data falls back to the current
    /// (default) state without surfacing an error. The expanded slot is
    /// never restored: fullscreen is a transient view.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        match storage.load() {
            Ok(Some(snapshot)) => {
                let clean = snapshot.sanitize();
                self.widths = clean.restore_widths();
                self.minimized = clean.minimized.clone();
                self.expanded = None;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    backend = storage.name(),
                    error = %e,
                    "failed to load persisted layout, using defaults"
                );
            }
        }
        self.storage = Some(storage);
        self
    }

    // -- Commands ----------------------------------------------------------

    /// Expand a panel fullscreen, or collapse it if already expanded.
    ///
    /// Expanding clears the minimized set (a minimized panel is restored
    /// before it expands); other panels are simply not rendered while the
    /// expansion lasts — their modes underneath are unchanged.
    pub fn expand(&mut self, id: PanelId) -> CommandOutcome {
        if self.expanded == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
            self.minimized.clear();
        }
        self.persist();
        CommandOutcome::Applied
    }

    /// Minimize a panel to the restore bar.
    ///
    /// Rejected when the panel is the last one that would remain visible.
    pub fn minimize(&mut self, id: PanelId) -> CommandOutcome {
        if self.minimized.contains(&id) {
            return CommandOutcome::Ignored;
        }
        if self.minimized.len() + 1 >= PanelId::COUNT {
            tracing::debug!(panel = %id, "minimize rejected: last visible panel");
            return CommandOutcome::Rejected(RejectReason::WouldHideAllPanels);
        }
        if self.expanded == Some(id) {
            self.expanded = None;
        }
        self.minimized.insert(id);
        self.persist();
        CommandOutcome::Applied
    }

    /// Bring a minimized panel back. No-op when it is not minimized.
    pub fn restore(&mut self, id: PanelId) -> CommandOutcome {
        if self.minimized.remove(&id) {
            self.persist();
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }

    /// Empty the minimized set and clear any expansion.
    pub fn restore_all(&mut self) -> CommandOutcome {
        if self.minimized.is_empty() && self.expanded.is_none() {
            return CommandOutcome::Ignored;
        }
        self.minimized.clear();
        self.expanded = None;
        self.persist();
        CommandOutcome::Applied
    }

    /// Replace widths for the panels named in `map`.
    ///
    /// `map` must be a normalized distribution (sum 100, bounds
    /// respected) over the panels it names — validated here, not
    /// re-solved; producing a valid map is the caller's job. When `map`
    /// covers a subset of panels (some are minimized), the new values are
    /// scaled into the share that subset currently holds, so the full map
    /// keeps summing to 100 and hidden panels get their space back intact
    /// on restore.
    pub fn set_widths(&mut self, map: &PanelWidths) -> CommandOutcome {
        if let Err(e) = map.validate(self.limits) {
            tracing::debug!(error = %e, "set_widths rejected");
            return CommandOutcome::Rejected(RejectReason::InvalidWidths(e));
        }

        let share: f32 = map
            .iter()
            .filter_map(|(id, _)| self.widths.get(id))
            .sum();
        let scale = if share > 0.0 { share / 100.0 } else { 1.0 };
        for (id, w) in map.iter() {
            self.widths.set(id, w * scale);
        }
        self.persist();
        CommandOutcome::Applied
    }

    // -- Queries -----------------------------------------------------------

    /// The panels currently rendered, in canonical order.
    ///
    /// An expanded panel is rendered alone; otherwise every panel not in
    /// the minimized set. Never empty.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<PanelId> {
        if let Some(id) = self.expanded {
            return vec![id];
        }
        PanelId::ALL
            .into_iter()
            .filter(|id| !self.minimized.contains(id))
            .collect()
    }

    /// Width map rescaled to 100 over the visible set, so minimized
    /// panels leave no gap. An expanded panel gets the full width.
    #[must_use]
    pub fn normalized_widths(&self) -> PanelWidths {
        let visible = self.visible_panels();
        if let Some(id) = self.expanded {
            return PanelWidths::from_entries([(id, 100.0)]);
        }
        self.widths.normalized(&visible)
    }

    /// Current mode of a panel, derived from the expanded slot and the
    /// minimized set.
    #[must_use]
    pub fn mode(&self, id: PanelId) -> PanelMode {
        if self.expanded == Some(id) {
            PanelMode::Expanded
        } else if self.minimized.contains(&id) {
            PanelMode::Minimized
        } else {
            PanelMode::Normal
        }
    }

    /// The expanded panel, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<PanelId> {
        self.expanded
    }

    /// The minimized set, in canonical order.
    #[must_use]
    pub fn minimized(&self) -> &BTreeSet<PanelId> {
        &self.minimized
    }

    /// The full (un-normalized) width map.
    #[must_use]
    pub fn widths(&self) -> &PanelWidths {
        &self.widths
    }

    /// The configured width bounds.
    #[must_use]
    pub fn limits(&self) -> WidthLimits {
        self.limits
    }

    // -- Persistence -------------------------------------------------------

    /// Best-effort write-through. A failure is logged and swallowed; the
    /// next applied command retries naturally.
    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let snapshot = LayoutSnapshot::capture(&self.widths, &self.minimized);
        if let Err(e) = storage.save(&snapshot) {
            tracing::warn!(
                backend = storage.name(),
                error = %e,
                "failed to persist workspace layout, in-memory state kept"
            );
        }
    }
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
