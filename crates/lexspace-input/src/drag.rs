#![forbid(unsafe_code)]

//! Divider drag state machine.
//!
//! # State Machine
//!
//! ```text
//! Idle --begin(Down)--> Dragging --update(Move)*--> Dragging
//!                          |  finish(Up) / cancel(Cancel, Escape,
//!                          |  focus loss, visibility loss)
//!                          v
//!                        Idle
//! ```
//!
//! # Invariants
//!
//! 1. One drag at a time; a second `Down` while dragging is rejected.
//! 2. Every move solves from the widths captured at drag start with the
//!    total pixel delta since the anchor — per-event deltas are never
//!    accumulated, so floating-point error cannot build up across a
//!    drag.
//! 3. A touch drag is bound to its first touch id; events from other
//!    touches are ignored for the whole drag.
//! 4. Teardown is unconditional: `finish` and `cancel` always return the
//!    controller to idle, whatever state the drag was in.
//!
//! # Failure Modes
//!
//! Rejected begins return [`DragRejection`] and leave the controller
//! idle. A move whose solve changes nothing writes nothing to the store.

use std::fmt;

use lexspace_core::{Modifiers, PanelId, PointerEvent, PointerPhase, ResizeKey, TouchId};
use lexspace_layout::{PanelWidths, SUM_EPSILON, resolve_widths};
use lexspace_state::WorkspaceStore;

/// Width delta in percent for one unmodified arrow-key press.
pub const KEY_STEP_PCT: f32 = 1.0;

/// Width delta in percent for a shift-modified arrow-key press.
pub const KEY_STEP_LARGE_PCT: f32 = 5.0;

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a drag could not start (or a nudge could not apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRejection {
    /// A drag is already in progress.
    AlreadyDragging,
    /// A panel is expanded fullscreen; there are no dividers to drag.
    PanelExpanded,
    /// Fewer than two panels are visible.
    TooFewPanels,
    /// The divider index does not exist in the current arrangement.
    UnknownDivider,
    /// The container width is zero, negative, or non-finite.
    DegenerateContainer,
}

impl fmt::Display for DragRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AlreadyDragging => "a drag is already in progress",
            Self::PanelExpanded => "a panel is expanded fullscreen",
            Self::TooFewPanels => "fewer than two panels are visible",
            Self::UnknownDivider => "no divider at that index",
            Self::DegenerateContainer => "container width is unusable",
        };
        f.write_str(msg)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// One in-flight drag: anchor, starting geometry, captured pointer.
#[derive(Debug, Clone)]
struct DragSession {
    divider: usize,
    start_x: f32,
    container_width: f32,
    /// Widths normalized over the visible set at drag start.
    start_widths: PanelWidths,
    order: Vec<PanelId>,
    /// `Some` when the drag is touch-driven; bound to the first touch.
    touch: Option<TouchId>,
}

impl DragSession {
    /// Whether an event belongs to the pointer that started this drag.
    fn accepts(&self, event: &PointerEvent) -> bool {
        self.touch == event.kind.touch_id()
    }
}

/// Translates divider pointer/key events into store width commands.
///
/// Construct one per workspace and hand it the store on each call; the
/// controller holds no store reference of its own.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress. Drives the global resizing flag
    /// hosts use to suppress text selection and hover effects.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a drag on `divider` from a pointer-down event.
    ///
    /// `container_width` is the pixel width of the panel row, used to
    /// convert pointer deltas into percent deltas for the whole drag.
    pub fn begin(
        &mut self,
        store: &WorkspaceStore,
        divider: usize,
        event: PointerEvent,
        container_width: f32,
    ) -> Result<(), DragRejection> {
        if self.session.is_some() {
            return Err(DragRejection::AlreadyDragging);
        }
        if store.expanded().is_some() {
            return Err(DragRejection::PanelExpanded);
        }
        let order = store.visible_panels();
        if order.len() < 2 {
            return Err(DragRejection::TooFewPanels);
        }
        if divider >= order.len() - 1 {
            return Err(DragRejection::UnknownDivider);
        }
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(DragRejection::DegenerateContainer);
        }

        tracing::debug!(divider, x = event.x, "drag started");
        self.session = Some(DragSession {
            divider,
            start_x: event.x,
            container_width,
            start_widths: store.normalized_widths(),
            order,
            touch: event.kind.touch_id(),
        });
        Ok(())
    }

    /// Apply a pointer-move event to the active drag.
    ///
    /// Returns `true` when the store's widths changed. Events that are
    /// not in the [`PointerPhase::Move`] phase, come from a pointer other
    /// than the one that started the drag, or arrive with no drag active
    /// are ignored.
    pub fn update(&mut self, store: &mut WorkspaceStore, event: PointerEvent) -> bool {
        if event.phase != PointerPhase::Move {
            return false;
        }
        let Some(session) = &self.session else {
            return false;
        };
        if !session.accepts(&event) {
            return false;
        }

        let delta_px = event.x - session.start_x;
        let delta_pct = delta_px / session.container_width * 100.0;
        let solved = resolve_widths(
            &session.start_widths,
            &session.order,
            session.divider,
            delta_pct,
            store.limits(),
        );

        if solved.approx_eq(&store.normalized_widths(), SUM_EPSILON) {
            return false;
        }
        store.set_widths(&solved).is_applied()
    }

    /// End the drag on pointer-up. Widths were committed continuously on
    /// each move, so this only tears the session down. Events in any
    /// other phase are ignored.
    pub fn finish(&mut self, event: PointerEvent) {
        if event.phase != PointerPhase::Up {
            return;
        }
        if let Some(session) = &self.session {
            if !session.accepts(&event) {
                return;
            }
            tracing::debug!(divider = session.divider, "drag finished");
            self.session = None;
        }
    }

    /// Abort the drag unconditionally: Escape, pointer-cancel, window
    /// blur, or tab visibility loss all land here.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(divider = session.divider, "drag cancelled");
        }
    }

    /// Route a raw pointer event by phase. `Down` must go through
    /// [`DragController::begin`] because it needs the divider index and
    /// container width; everything else dispatches here.
    pub fn handle_pointer(&mut self, store: &mut WorkspaceStore, event: PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => false,
            PointerPhase::Move => self.update(store, event),
            PointerPhase::Up => {
                self.finish(event);
                false
            }
            PointerPhase::Cancel => {
                self.cancel();
                false
            }
        }
    }

    /// Keyboard resize on a focused divider: one step per press,
    /// [`KEY_STEP_LARGE_PCT`] with shift held. Same constraints as a
    /// pointer drag, minus the container geometry.
    pub fn nudge(
        &self,
        store: &mut WorkspaceStore,
        divider: usize,
        key: ResizeKey,
        modifiers: Modifiers,
    ) -> Result<bool, DragRejection> {
        if self.session.is_some() {
            return Err(DragRejection::AlreadyDragging);
        }
        if store.expanded().is_some() {
            return Err(DragRejection::PanelExpanded);
        }
        let order = store.visible_panels();
        if order.len() < 2 {
            return Err(DragRejection::TooFewPanels);
        }
        if divider >= order.len() - 1 {
            return Err(DragRejection::UnknownDivider);
        }

        let step = if modifiers.contains(Modifiers::SHIFT) {
            KEY_STEP_LARGE_PCT
        } else {
            KEY_STEP_PCT
        };
        let current = store.normalized_widths();
        let solved = resolve_widths(&current, &order, divider, key.sign() * step, store.limits());

        if solved.approx_eq(&current, SUM_EPSILON) {
            return Ok(false);
        }
        Ok(store.set_widths(&solved).is_applied())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lexspace_core::PointerKind;

    const CONTAINER: f32 = 1000.0;

    fn down(x: f32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Down, x)
    }

    fn mv(x: f32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Move, x)
    }

    fn up(x: f32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Up, x)
    }

    #[test]
    fn basic_drag_commits_widths() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();

        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        assert!(ctl.is_dragging());

        // 100px right on a 1000px container is +10%.
        assert!(ctl.update(&mut store, mv(500.0)));
        let w = store.normalized_widths();
        assert!((w.get(PanelId::Document).unwrap() - 43.33).abs() < 0.05);

        ctl.finish(up(500.0));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn moves_solve_from_drag_start_not_cumulatively() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();

        // Out 100px and back to the anchor: widths return to the start.
        let before = store.normalized_widths();
        ctl.update(&mut store, mv(500.0));
        ctl.update(&mut store, mv(400.0));
        assert!(store.normalized_widths().approx_eq(&before, 0.05));
    }

    #[test]
    fn second_begin_while_dragging_is_rejected() {
        let store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        assert_eq!(
            ctl.begin(&store, 1, down(700.0), CONTAINER),
            Err(DragRejection::AlreadyDragging)
        );
    }

    #[test]
    fn begin_refused_while_expanded() {
        let mut store = WorkspaceStore::new();
        store.expand(PanelId::Document);
        let mut ctl = DragController::new();
        assert_eq!(
            ctl.begin(&store, 0, down(400.0), CONTAINER),
            Err(DragRejection::PanelExpanded)
        );
    }

    #[test]
    fn begin_refused_with_one_visible_panel() {
        let mut store = WorkspaceStore::new();
        store.minimize(PanelId::Insights);
        store.minimize(PanelId::Qa);
        let mut ctl = DragController::new();
        assert_eq!(
            ctl.begin(&store, 0, down(400.0), CONTAINER),
            Err(DragRejection::TooFewPanels)
        );
    }

    #[test]
    fn begin_refused_for_out_of_range_divider() {
        let store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        assert_eq!(
            ctl.begin(&store, 2, down(400.0), CONTAINER),
            Err(DragRejection::UnknownDivider)
        );
    }

    #[test]
    fn begin_refused_for_zero_width_container() {
        let store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        assert_eq!(
            ctl.begin(&store, 0, down(400.0), 0.0),
            Err(DragRejection::DegenerateContainer)
        );
    }

    #[test]
    fn cancel_tears_down_and_allows_restart() {
        let store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        ctl.cancel();
        assert!(!ctl.is_dragging());
        assert!(ctl.begin(&store, 0, down(400.0), CONTAINER).is_ok());
    }

    #[test]
    fn touch_drag_ignores_other_touches() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        let first = TouchId(1);
        let second = TouchId(2);

        ctl.begin(
            &store,
            0,
            PointerEvent::touch(first, PointerPhase::Down, 400.0),
            CONTAINER,
        )
        .unwrap();

        // The second finger moves and lifts; the drag stays put.
        assert!(!ctl.update(
            &mut store,
            PointerEvent::touch(second, PointerPhase::Move, 800.0)
        ));
        ctl.finish(PointerEvent::touch(second, PointerPhase::Up, 800.0));
        assert!(ctl.is_dragging());

        // The first finger still drives it.
        assert!(ctl.update(
            &mut store,
            PointerEvent::touch(first, PointerPhase::Move, 500.0)
        ));
        ctl.finish(PointerEvent::touch(first, PointerPhase::Up, 500.0));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn mouse_drag_ignores_touch_events() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        assert!(!ctl.update(
            &mut store,
            PointerEvent::touch(TouchId(1), PointerPhase::Move, 900.0)
        ));
        assert_eq!(
            store.normalized_widths(),
            WorkspaceStore::new().normalized_widths()
        );
    }

    #[test]
    fn update_ignores_non_move_phases() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        let before = store.normalized_widths();

        // Down and Up events handed to update directly must not be
        // applied as moves, and must not tear the session down.
        assert!(!ctl.update(&mut store, down(900.0)));
        assert!(!ctl.update(&mut store, up(900.0)));
        assert_eq!(store.normalized_widths(), before);
        assert!(ctl.is_dragging());

        // And finish ignores anything that is not an Up.
        ctl.finish(mv(900.0));
        assert!(ctl.is_dragging());
        ctl.finish(up(900.0));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn handle_pointer_routes_by_phase() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();

        assert!(ctl.handle_pointer(&mut store, mv(480.0)));
        assert!(!ctl.handle_pointer(
            &mut store,
            PointerEvent {
                kind: PointerKind::Mouse,
                phase: PointerPhase::Cancel,
                x: 480.0,
            }
        ));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn drag_against_the_wall_changes_nothing() {
        let mut store = WorkspaceStore::new();
        let custom = PanelWidths::from_entries([
            (PanelId::Document, 60.0),
            (PanelId::Insights, 20.0),
            (PanelId::Qa, 20.0),
        ]);
        assert!(store.set_widths(&custom).is_applied());

        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(600.0), CONTAINER).unwrap();
        // Donors are both at the 20% floor; a grow has no capacity.
        assert!(!ctl.update(&mut store, mv(900.0)));
        assert_eq!(store.normalized_widths(), custom);
    }

    #[test]
    fn nudge_steps_by_one_percent() {
        let mut store = WorkspaceStore::new();
        let ctl = DragController::new();
        let before = store.normalized_widths().get(PanelId::Document).unwrap();

        assert_eq!(
            ctl.nudge(&mut store, 0, ResizeKey::Right, Modifiers::empty()),
            Ok(true)
        );
        let after = store.normalized_widths().get(PanelId::Document).unwrap();
        assert!((after - before - KEY_STEP_PCT).abs() < 0.05);
    }

    #[test]
    fn shift_nudge_steps_by_five_percent() {
        let mut store = WorkspaceStore::new();
        let ctl = DragController::new();
        let before = store.normalized_widths().get(PanelId::Document).unwrap();

        assert_eq!(
            ctl.nudge(&mut store, 0, ResizeKey::Left, Modifiers::SHIFT),
            Ok(true)
        );
        let after = store.normalized_widths().get(PanelId::Document).unwrap();
        assert!((before - after - KEY_STEP_LARGE_PCT).abs() < 0.05);
    }

    #[test]
    fn nudge_refused_while_dragging() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(400.0), CONTAINER).unwrap();
        assert_eq!(
            ctl.nudge(&mut store, 1, ResizeKey::Right, Modifiers::empty()),
            Err(DragRejection::AlreadyDragging)
        );
    }

    #[test]
    fn widths_stay_in_bounds_across_a_long_drag() {
        let mut store = WorkspaceStore::new();
        let mut ctl = DragController::new();
        ctl.begin(&store, 0, down(100.0), CONTAINER).unwrap();

        for x in (100..=2000).step_by(50) {
            ctl.update(&mut store, mv(x as f32));
            let w = store.normalized_widths();
            assert!((w.sum() - 100.0).abs() < SUM_EPSILON * 10.0);
            for (_, width) in w.iter() {
                assert!((20.0 - 0.01..=70.0 + 0.01).contains(&width));
            }
        }
        ctl.finish(up(2000.0));
    }
}
