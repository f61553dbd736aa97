#![forbid(unsafe_code)]

//! Per-document workspace session tying the store to a rendered view.
//!
//! A [`WorkspaceSession`] owns its [`WorkspaceStore`] and hands it by
//! reference to anything that needs commands or queries. Collaborators
//! receive the session (or its store) through their constructors rather
//! than reaching for a global instance, which keeps tests free of shared
//! mutable state between cases.
//!
//! The session also holds the two pieces of view state that do not
//! belong in the store: the currently opened document (the workspace is
//! empty without one) and the independent mobile panel selection.

use lexspace_core::{Breakpoints, PanelId, ViewportClass};
use lexspace_layout::{LayoutPlan, select_layout};

use crate::store::WorkspaceStore;

// ---------------------------------------------------------------------------
// Document token
// ---------------------------------------------------------------------------

/// Opaque handle to the document under analysis.
///
/// The layout engine never looks inside: panels render whatever content
/// the token resolves to elsewhere. Holding one means the workspace has
/// something to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentToken(String);

impl DocumentToken {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// What the workspace renders for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceView {
    /// No document open: an upload prompt, no panels at all.
    Empty,
    /// A document is open; render this arrangement.
    Panels(LayoutPlan),
}

/// One open workspace: a document, its layout store, and view state.
#[derive(Debug)]
pub struct WorkspaceSession {
    store: WorkspaceStore,
    breakpoints: Breakpoints,
    document: Option<DocumentToken>,
    active_mobile: Option<PanelId>,
}

impl WorkspaceSession {
    /// Session over an existing store, default breakpoints, no document.
    #[must_use]
    pub fn new(store: WorkspaceStore) -> Self {
        Self::with_breakpoints(store, Breakpoints::DEFAULT)
    }

    /// Session with custom responsive thresholds.
    #[must_use]
    pub fn with_breakpoints(store: WorkspaceStore, breakpoints: Breakpoints) -> Self {
        Self {
            store,
            breakpoints,
            document: None,
            active_mobile: None,
        }
    }

    /// Open a document, replacing any previous one. Layout state is kept:
    /// widths and modes belong to the workspace, not the document.
    pub fn open_document(&mut self, token: DocumentToken) {
        tracing::debug!(document = token.as_str(), "document opened");
        self.document = Some(token);
    }

    /// Close the current document. The workspace renders empty until the
    /// next open; layout state survives for it.
    pub fn close_document(&mut self) {
        if let Some(token) = self.document.take() {
            tracing::debug!(document = token.as_str(), "document closed");
        }
    }

    /// The open document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&DocumentToken> {
        self.document.as_ref()
    }

    /// Select which panel the mobile arrangement shows. Independent of
    /// minimize/expand: it is a navigation choice, not a mode change.
    pub fn set_active_mobile(&mut self, panel: PanelId) {
        self.active_mobile = Some(panel);
    }

    /// The mobile panel selection, if one was made.
    #[must_use]
    pub fn active_mobile(&self) -> Option<PanelId> {
        self.active_mobile
    }

    /// The responsive thresholds this session classifies against.
    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    /// Classify a viewport width with this session's breakpoints.
    #[must_use]
    pub fn classify(&self, viewport_width: u32) -> ViewportClass {
        self.breakpoints.classify_width(viewport_width)
    }

    /// Compute the view for a viewport width.
    ///
    /// Pure with respect to the session: resizing the window (calling
    /// this with a different width) never mutates modes or widths, only
    /// the arrangement they are rendered in.
    #[must_use]
    pub fn view(&self, viewport_width: u32) -> WorkspaceView {
        if self.document.is_none() {
            return WorkspaceView::Empty;
        }
        let viewport = self.classify(viewport_width);
        let visible = self.store.visible_panels();
        let plan = select_layout(
            viewport,
            &visible,
            self.store.widths(),
            self.active_mobile,
        );
        WorkspaceView::Panels(plan)
    }

    /// Read access to the layout store.
    #[must_use]
    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    /// Command access to the layout store.
    pub fn store_mut(&mut self) -> &mut WorkspaceStore {
        &mut self.store
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
