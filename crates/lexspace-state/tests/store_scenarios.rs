#![forbid(unsafe_code)]

//! End-to-end workspace state scenarios: minimize limits, expand
//! round-trips, viewport transitions, and persistence.

use std::sync::Arc;

use lexspace_core::{PanelId, PanelMode, ViewportClass};
use lexspace_layout::LayoutPlan;
use lexspace_state::{
    CommandOutcome, DocumentToken, MemoryStorage, RejectReason, StorageBackend, WorkspaceSession,
    WorkspaceStore, WorkspaceView,
};

const DESKTOP: u32 = 1440;
const MOBILE: u32 = 414;

fn session_with(store: WorkspaceStore) -> WorkspaceSession {
    let mut session = WorkspaceSession::new(store);
    session.open_document(DocumentToken::new("merger-agreement.pdf"));
    session
}

#[test]
fn minimizing_down_to_one_panel_then_no_further() {
    let mut store = WorkspaceStore::new();
    assert_eq!(store.minimize(PanelId::Insights), CommandOutcome::Applied);
    assert_eq!(store.minimize(PanelId::Qa), CommandOutcome::Applied);

    // The last visible panel refuses to go.
    assert_eq!(
        store.minimize(PanelId::Document),
        CommandOutcome::Rejected(RejectReason::WouldHideAllPanels)
    );
    assert_eq!(store.visible_panels(), vec![PanelId::Document]);
    assert_eq!(store.mode(PanelId::Document), PanelMode::Normal);

    // The sole survivor takes the full width.
    let widths = store.normalized_widths();
    assert!((widths.get(PanelId::Document).unwrap() - 100.0).abs() < 0.01);
}

#[test]
fn expand_round_trip_preserves_custom_widths() {
    let mut store = WorkspaceStore::new();
    let custom = lexspace_layout::PanelWidths::from_entries([
        (PanelId::Document, 50.0),
        (PanelId::Insights, 30.0),
        (PanelId::Qa, 20.0),
    ]);
    assert!(store.set_widths(&custom).is_applied());

    store.expand(PanelId::Insights);
    assert_eq!(store.visible_panels(), vec![PanelId::Insights]);
    assert_eq!(
        store.normalized_widths().get(PanelId::Insights),
        Some(100.0)
    );

    // Collapse restores the exact pre-expansion geometry.
    store.expand(PanelId::Insights);
    assert_eq!(store.widths(), &custom);
    assert_eq!(store.visible_panels(), PanelId::ALL.to_vec());
}

#[test]
fn viewport_shrink_and_grow_leaves_state_untouched() {
    let mut session = session_with(WorkspaceStore::new());
    session.store_mut().minimize(PanelId::Qa);
    session.store_mut().expand(PanelId::Document);
    session.store_mut().expand(PanelId::Document);

    assert_eq!(session.classify(DESKTOP), ViewportClass::Desktop);
    assert_eq!(session.classify(MOBILE), ViewportClass::Mobile);

    let WorkspaceView::Panels(mobile_plan) = session.view(MOBILE) else {
        panic!("expected panels");
    };
    assert_eq!(mobile_plan.panels().len(), 1);

    let WorkspaceView::Panels(desktop_plan) = session.view(DESKTOP) else {
        panic!("expected panels");
    };
    let LayoutPlan::Columns { panels, .. } = desktop_plan else {
        panic!("expected columns");
    };
    assert_eq!(panels, vec![PanelId::Document, PanelId::Insights]);
    assert_eq!(session.store().mode(PanelId::Qa), PanelMode::Minimized);
}

#[test]
fn layout_survives_a_reload_through_shared_storage() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());

    {
        let mut store = WorkspaceStore::new().with_storage(storage.clone());
        store.minimize(PanelId::Qa);
        let pair = lexspace_layout::PanelWidths::from_entries([
            (PanelId::Document, 65.0),
            (PanelId::Insights, 35.0),
        ]);
        assert!(store.set_widths(&pair).is_applied());
        store.expand(PanelId::Document);
    }

    // Fresh store, same backend: widths and minimized set come back,
    // the expansion does not.
    let restored = WorkspaceStore::new().with_storage(storage.clone());
    assert_eq!(restored.expanded(), None);
    assert!((restored.widths().sum() - 100.0).abs() < 0.01);

    // Expanding cleared the minimized set before the final save.
    assert!(restored.minimized().is_empty());
}

#[test]
fn minimized_set_persists_when_no_expansion_follows() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());

    {
        let mut store = WorkspaceStore::new().with_storage(storage.clone());
        store.minimize(PanelId::Insights);
    }

    let restored = WorkspaceStore::new().with_storage(storage);
    assert_eq!(restored.mode(PanelId::Insights), PanelMode::Minimized);
    assert_eq!(
        restored.visible_panels(),
        vec![PanelId::Document, PanelId::Qa]
    );
}

#[test]
fn corrupt_persisted_state_falls_back_to_defaults() {
    let snapshot = {
        let mut snap = lexspace_state::LayoutSnapshot::default_layout();
        snap.schema_version = 999;
        snap
    };
    let storage = Arc::new(MemoryStorage::with_snapshot(snapshot));

    let store = WorkspaceStore::new().with_storage(storage);
    assert_eq!(store.visible_panels(), PanelId::ALL.to_vec());
    assert!((store.widths().sum() - 100.0).abs() < 0.01);
}

#[test]
fn restore_commands_are_idempotent() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
    let mut store = WorkspaceStore::new().with_storage(storage.clone());

    store.minimize(PanelId::Document);
    store.minimize(PanelId::Insights);

    assert_eq!(store.restore(PanelId::Document), CommandOutcome::Applied);
    assert_eq!(store.restore(PanelId::Document), CommandOutcome::Ignored);

    assert_eq!(store.restore_all(), CommandOutcome::Applied);
    assert_eq!(store.restore_all(), CommandOutcome::Ignored);

    // The backend holds the final state exactly once restored.
    let saved = storage.load().unwrap().unwrap();
    assert!(saved.minimized.is_empty());
}
