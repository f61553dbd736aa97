#![forbid(unsafe_code)]

//! Percentage width maps and the divider-drag geometry solver.
//!
//! A [`PanelWidths`] maps each panel to a floating-point percentage of the
//! container width. [`resolve_widths`] takes a current map, a divider
//! index, and a drag delta already converted to percent, and produces a
//! new constraint-satisfying map — or the unchanged input when the
//! request cannot be satisfied.
//!
//! # Invariants
//!
//! 1. Solver output over the ordered panel set sums to 100 within
//!    [`SUM_EPSILON`] (drift is rescaled away after every adjustment).
//! 2. Every solved width lies within the configured [`WidthLimits`].
//! 3. Rejection is atomic: an unsatisfiable delta returns the input map
//!    unchanged — never a partial update.
//! 4. The solver is stateless and mode-blind; callers pass only panels
//!    currently occupying width.
//!
//! # Failure Modes
//!
//! - Unknown divider index, fewer than two panels, or a panel missing
//!   from the map: input returned unchanged.
//! - Accumulated float drift beyond [`SUM_EPSILON`]: all widths are
//!   rescaled by `100 / sum` to restore the invariant exactly.

use std::fmt;

use lexspace_core::PanelId;
use rustc_hash::FxHashMap;

/// Smallest width any panel may occupy, in percent.
pub const MIN_WIDTH_PCT: f32 = 20.0;

/// Largest width any panel may occupy, in percent.
pub const MAX_WIDTH_PCT: f32 = 70.0;

/// Tolerance on the sum-to-100 invariant before rescaling kicks in.
pub const SUM_EPSILON: f32 = 0.01;

/// Deltas smaller than this are treated as "no movement".
const MIN_EFFECTIVE_DELTA: f32 = 1e-3;

/// Slack applied when comparing against the min/max bounds, absorbing
/// float rounding from proportional distribution.
const BOUND_SLACK: f32 = 1e-3;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Tunable per-panel width bounds, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthLimits {
    pub min_pct: f32,
    pub max_pct: f32,
}

impl WidthLimits {
    /// The observed production bounds: 20% to 70%.
    pub const DEFAULT: Self = Self {
        min_pct: MIN_WIDTH_PCT,
        max_pct: MAX_WIDTH_PCT,
    };

    /// Create custom bounds. Swapped arguments are reordered.
    ///
    /// Callers must keep `min_pct * panel_count <= 100` for the solver to
    /// have any feasible distribution.
    #[must_use]
    pub fn new(min_pct: f32, max_pct: f32) -> Self {
        if min_pct <= max_pct {
            Self { min_pct, max_pct }
        } else {
            Self {
                min_pct: max_pct,
                max_pct: min_pct,
            }
        }
    }

    /// Clamp a single width into bounds.
    #[must_use]
    pub fn clamp(self, width: f32) -> f32 {
        width.clamp(self.min_pct, self.max_pct)
    }

    /// Whether a width satisfies the bounds, with rounding slack.
    #[must_use]
    pub fn contains(self, width: f32) -> bool {
        width >= self.min_pct - BOUND_SLACK && width <= self.max_pct + BOUND_SLACK
    }
}

impl Default for WidthLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// PanelWidths
// ---------------------------------------------------------------------------

/// Mapping from panel to its percentage of the container width.
///
/// Keyed by [`PanelId`] rather than position so a fourth panel is a data
/// change, not a structural one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelWidths {
    values: FxHashMap<PanelId, f32>,
}

impl PanelWidths {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Equal distribution over the given panels, summing to exactly 100.
    ///
    /// The last panel absorbs the rounding remainder so the sum is exact.
    #[must_use]
    pub fn equal_split(panels: &[PanelId]) -> Self {
        let mut values = FxHashMap::default();
        if panels.is_empty() {
            return Self { values };
        }
        let share = 100.0 / panels.len() as f32;
        let mut allocated = 0.0;
        for (i, &id) in panels.iter().enumerate() {
            let w = if i == panels.len() - 1 {
                100.0 - allocated
            } else {
                share
            };
            values.insert(id, w);
            allocated += w;
        }
        Self { values }
    }

    /// Build from explicit entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (PanelId, f32)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Width for a panel, if present.
    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<f32> {
        self.values.get(&id).copied()
    }

    /// Insert or replace a panel's width.
    pub fn set(&mut self, id: PanelId, width: f32) {
        self.values.insert(id, width);
    }

    /// Number of panels in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the map has an entry for a panel.
    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.values.contains_key(&id)
    }

    /// Iterate entries in canonical panel order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, f32)> + '_ {
        PanelId::ALL
            .into_iter()
            .filter_map(|id| self.get(id).map(|w| (id, w)))
    }

    /// Sum over all entries.
    #[must_use]
    pub fn sum(&self) -> f32 {
        self.values.values().sum()
    }

    /// The map restricted to the given panels, rescaled to sum to 100.
    ///
    /// This is what rendering uses so minimized panels leave no gap and a
    /// two-visible layout is a clean split rather than stale three-way
    /// percentages. Panels absent from the map, or a degenerate zero sum,
    /// fall back to an equal split.
    #[must_use]
    pub fn normalized(&self, panels: &[PanelId]) -> PanelWidths {
        if panels.is_empty() {
            return PanelWidths::new();
        }
        let mut subset = Vec::with_capacity(panels.len());
        for &id in panels {
            match self.get(id) {
                Some(w) if w.is_finite() && w > 0.0 => subset.push((id, w)),
                _ => return PanelWidths::equal_split(panels),
            }
        }
        let total: f32 = subset.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return PanelWidths::equal_split(panels);
        }
        let scale = 100.0 / total;
        PanelWidths::from_entries(subset.into_iter().map(|(id, w)| (id, w * scale)))
    }

    /// Rescale every entry so the sum is exactly 100.
    ///
    /// No-op for empty or zero-sum maps.
    pub fn rescale_to_100(&mut self) {
        let total = self.sum();
        if total <= 0.0 {
            return;
        }
        let scale = 100.0 / total;
        for w in self.values.values_mut() {
            *w *= scale;
        }
    }

    /// Validate the sum-to-100 and per-panel bound invariants.
    pub fn validate(&self, limits: WidthLimits) -> Result<(), WidthError> {
        if self.values.is_empty() {
            return Err(WidthError::Empty);
        }
        for (id, w) in self.iter() {
            if !w.is_finite() {
                return Err(WidthError::NotFinite { panel: id });
            }
            if !limits.contains(w) {
                return Err(WidthError::OutOfBounds {
                    panel: id,
                    width: w,
                    min: limits.min_pct,
                    max: limits.max_pct,
                });
            }
        }
        let sum = self.sum();
        if (sum - 100.0).abs() > SUM_EPSILON {
            return Err(WidthError::BadSum { sum });
        }
        Ok(())
    }

    /// Entry-wise approximate equality, used to detect whether a solver
    /// call actually moved anything.
    #[must_use]
    pub fn approx_eq(&self, other: &PanelWidths, epsilon: f32) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(id, w)| other.get(id).is_some_and(|o| (w - o).abs() <= epsilon))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a width map failed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthError {
    /// The map has no entries.
    Empty,
    /// A width is NaN or infinite.
    NotFinite { panel: PanelId },
    /// A width violates the min/max bounds.
    OutOfBounds {
        panel: PanelId,
        width: f32,
        min: f32,
        max: f32,
    },
    /// The sum deviates from 100 beyond tolerance.
    BadSum { sum: f32 },
}

impl fmt::Display for WidthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("width map is empty"),
            Self::NotFinite { panel } => write!(f, "width for {panel} is not finite"),
            Self::OutOfBounds {
                panel,
                width,
                min,
                max,
            } => write!(
                f,
                "width {width:.2}% for {panel} outside bounds [{min:.0}%, {max:.0}%]"
            ),
            Self::BadSum { sum } => write!(f, "widths sum to {sum:.2}%, expected 100%"),
        }
    }
}

impl std::error::Error for WidthError {}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Resolve a divider drag into a new width distribution.
///
/// `order` is the ordered list of panels currently occupying width;
/// divider `i` sits between `order[i]` and `order[i + 1]`. The panel
/// before the divider takes `delta_pct` (clamped to the limits and to
/// what the donors can absorb); panels after the divider donate or absorb
/// the complement in proportion to their current ratio, falling back to
/// an equal split down to the floor when proportional donation would
/// underflow a minimum. Panels before the dragged panel are untouched.
///
/// Returns the input unchanged when the request cannot move anything.
#[must_use]
pub fn resolve_widths(
    current: &PanelWidths,
    order: &[PanelId],
    divider: usize,
    delta_pct: f32,
    limits: WidthLimits,
) -> PanelWidths {
    if order.len() < 2 || divider + 1 >= order.len() || !delta_pct.is_finite() {
        return current.clone();
    }

    // Collect ordered widths; a panel missing from the map is a caller
    // error and the request is rejected whole.
    let mut ws = Vec::with_capacity(order.len());
    for &id in order {
        match current.get(id) {
            Some(w) if w.is_finite() => ws.push(w),
            _ => return current.clone(),
        }
    }

    let lead = divider;
    let target = limits.clamp(ws[lead] + delta_pct);
    let mut d = target - ws[lead];

    // The donors bound how far the lead panel can actually move.
    let capacity: f32 = if d > 0.0 {
        ws[lead + 1..]
            .iter()
            .map(|w| (w - limits.min_pct).max(0.0))
            .sum()
    } else {
        ws[lead + 1..]
            .iter()
            .map(|w| (limits.max_pct - w).max(0.0))
            .sum()
    };
    d = d.clamp(-capacity, capacity);
    if d.abs() < MIN_EFFECTIVE_DELTA {
        return current.clone();
    }

    ws[lead] += d;
    if d > 0.0 {
        take_from_donors(&mut ws[lead + 1..], d, limits.min_pct);
    } else {
        give_to_donors(&mut ws[lead + 1..], -d, limits.max_pct);
    }

    // Restore the sum invariant exactly when float drift accumulated.
    let sum: f32 = ws.iter().sum();
    if (sum - 100.0).abs() > SUM_EPSILON && sum > 0.0 {
        let scale = 100.0 / sum;
        for w in &mut ws {
            *w *= scale;
        }
    }

    let mut out = current.clone();
    for (&id, w) in order.iter().zip(ws) {
        out.set(id, w);
    }
    out
}

/// Remove `amount` from the donors, proportional to their current ratio.
///
/// Falls back to an equal split clamped at the floor when the
/// proportional share would push any donor below minimum. The caller has
/// already verified total capacity, so the loop always drains `amount`.
fn take_from_donors(donors: &mut [f32], amount: f32, floor: f32) {
    let total: f32 = donors.iter().sum();
    if total > 0.0 {
        let shares: Vec<f32> = donors.iter().map(|w| amount * w / total).collect();
        let fits = donors
            .iter()
            .zip(&shares)
            .all(|(w, take)| w - take >= floor - BOUND_SLACK);
        if fits {
            for (w, take) in donors.iter_mut().zip(shares) {
                *w -= take;
            }
            return;
        }
    }

    // Equal split down to the floor, remainder redistributed.
    let mut remaining = amount;
    while remaining > MIN_EFFECTIVE_DELTA {
        let open = donors.iter().filter(|w| **w > floor + BOUND_SLACK).count();
        if open == 0 {
            break;
        }
        let share = remaining / open as f32;
        for w in donors.iter_mut() {
            if *w > floor + BOUND_SLACK {
                let take = share.min(*w - floor);
                *w -= take;
                remaining -= take;
            }
        }
    }
}

/// Hand `amount` to the donors, proportional to their current ratio,
/// clamped at the ceiling with an equal-split fallback.
fn give_to_donors(donors: &mut [f32], amount: f32, ceiling: f32) {
    let total: f32 = donors.iter().sum();
    if total > 0.0 {
        let shares: Vec<f32> = donors.iter().map(|w| amount * w / total).collect();
        let fits = donors
            .iter()
            .zip(&shares)
            .all(|(w, give)| w + give <= ceiling + BOUND_SLACK);
        if fits {
            for (w, give) in donors.iter_mut().zip(shares) {
                *w += give;
            }
            return;
        }
    }

    let mut remaining = amount;
    while remaining > MIN_EFFECTIVE_DELTA {
        let open = donors
            .iter()
            .filter(|w| **w < ceiling - BOUND_SLACK)
            .count();
        if open == 0 {
            break;
        }
        let share = remaining / open as f32;
        for w in donors.iter_mut() {
            if *w < ceiling - BOUND_SLACK {
                let give = share.min(ceiling - *w);
                *w += give;
                remaining -= give;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
