#![forbid(unsafe_code)]

//! Authoritative workspace state for Lexspace.
//!
//! The [`WorkspaceStore`] is the single writer of layout state: panel
//! visibility modes, the width map, the expanded slot, and the minimized
//! set all mutate exclusively through its commands. Everything else —
//! drag controller, responsive selector, minimized bar — either calls
//! those commands or reads the derived queries. This single-writer
//! discipline is the core's substitute for locking in a single-threaded
//! event-loop model.
//!
//! Persistence is best-effort: every applied command writes a
//! [`LayoutSnapshot`] through the configured [`StorageBackend`]; a failed
//! write is logged and swallowed, and in-memory state stays authoritative
//! for the session.

pub mod persist;
pub mod session;
pub mod snapshot;
pub mod store;

pub use persist::{FileStorage, MemoryStorage, StorageBackend, StorageError, StorageResult};
pub use session::{DocumentToken, WorkspaceSession, WorkspaceView};
pub use snapshot::{LAYOUT_SNAPSHOT_SCHEMA_VERSION, LayoutSnapshot};
pub use store::{CommandOutcome, RejectReason, WorkspaceStore};
