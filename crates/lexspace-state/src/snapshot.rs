#![forbid(unsafe_code)]

//! Persisted layout schema with versioning and load-time sanitization.
//!
//! A [`LayoutSnapshot`] records only layout geometry: width percentages
//! per panel and the minimized-set membership. The expanded slot is
//! intentionally absent — fullscreen is a transient view, not a saved
//! layout, so an expanded panel returns to normal on reload.
//!
//! # Schema Versioning Policy
//!
//! - Breaking changes (field removal, semantic changes) bump
//!   [`LAYOUT_SNAPSHOT_SCHEMA_VERSION`]; loaders treat unknown versions
//!   as absent state and substitute defaults.
//! - The version field defaults to the current version when missing so
//!   pre-versioning records still load.
//!
//! # Failure Modes
//!
//! Corrupt data never surfaces to the user: [`LayoutSnapshot::sanitize`]
//! replaces non-finite or missing widths with the default layout,
//! rescales drifted sums back to 100, and clears a minimized set that
//! would hide every panel.

use std::collections::{BTreeMap, BTreeSet};

use lexspace_core::PanelId;
use lexspace_layout::PanelWidths;
use serde::{Deserialize, Serialize};

/// Current layout snapshot schema version.
pub const LAYOUT_SNAPSHOT_SCHEMA_VERSION: u16 = 1;

fn default_snapshot_version() -> u16 {
    LAYOUT_SNAPSHOT_SCHEMA_VERSION
}

/// Persisted workspace layout geometry.
///
/// Serialized as JSON with panel keys in snake_case; `BTreeMap` /
/// `BTreeSet` keep the wire format deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Schema version for migration detection.
    #[serde(default = "default_snapshot_version")]
    pub schema_version: u16,
    /// Width percentage per panel, summing to 100 over the full set.
    pub widths: BTreeMap<PanelId, f32>,
    /// Panels hidden to the minimized bar.
    #[serde(default)]
    pub minimized: BTreeSet<PanelId>,
}

impl LayoutSnapshot {
    /// Capture a snapshot from live store state.
    #[must_use]
    pub fn capture(widths: &PanelWidths, minimized: &BTreeSet<PanelId>) -> Self {
        Self {
            schema_version: LAYOUT_SNAPSHOT_SCHEMA_VERSION,
            widths: widths.iter().collect(),
            minimized: minimized.clone(),
        }
    }

    /// The first-load default: equal widths, nothing minimized.
    #[must_use]
    pub fn default_layout() -> Self {
        Self::capture(&PanelWidths::equal_split(&PanelId::ALL), &BTreeSet::new())
    }

    /// Repair a loaded snapshot into a usable one.
    ///
    /// - Unknown schema versions are treated as absent (defaults).
    /// - A width set that is missing a panel, non-finite, or non-positive
    ///   is replaced wholesale with the default split.
    /// - A drifted sum is rescaled back to exactly 100. Individual
    ///   entries may sit outside the render bounds (a panel minimized at
    ///   save time legitimately leaves its neighbors scaled down);
    ///   normalization at render time re-applies the bounds.
    /// - A minimized set covering every panel is cleared so at least one
    ///   panel stays visible.
    #[must_use]
    pub fn sanitize(self) -> Self {
        if self.schema_version != LAYOUT_SNAPSHOT_SCHEMA_VERSION {
            tracing::warn!(
                found = self.schema_version,
                expected = LAYOUT_SNAPSHOT_SCHEMA_VERSION,
                "unknown layout snapshot version, using defaults"
            );
            return Self::default_layout();
        }

        let complete = PanelId::ALL.iter().all(|id| {
            self.widths
                .get(id)
                .is_some_and(|w| w.is_finite() && *w > 0.0)
        });
        let mut widths = if complete {
            PanelWidths::from_entries(self.widths.iter().map(|(&id, &w)| (id, w)))
        } else {
            tracing::warn!("persisted widths incomplete or corrupt, using defaults");
            PanelWidths::equal_split(&PanelId::ALL)
        };
        widths.rescale_to_100();

        let mut minimized = self.minimized;
        minimized.retain(|id| PanelId::ALL.contains(id));
        if minimized.len() >= PanelId::COUNT {
            tracing::warn!("persisted minimized set hides every panel, clearing it");
            minimized.clear();
        }

        Self::capture(&widths, &minimized)
    }

    /// The width map this snapshot restores.
    #[must_use]
    pub fn restore_widths(&self) -> PanelWidths {
        PanelWidths::from_entries(self.widths.iter().map(|(&id, &w)| (id, w)))
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self::default_layout()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
