#![forbid(unsafe_code)]

//! OS color-scheme signal with explicit change subscription.
//!
//! The host pushes the current scheme into [`ColorSchemeSignal::set`]
//! whenever the OS preference changes; interested components subscribe
//! once and are notified on every real change. This replaces the pattern
//! of re-invoking a theme setter to force a re-check: the signal *is* the
//! source of truth, and subscribers react to it.
//!
//! # Invariants
//!
//! 1. `set(v)` where `v == current` is a no-op: no notification, no
//!    version bump.
//! 2. Subscribers are notified in registration order.
//! 3. Dropping a [`SchemeSubscription`] guard detaches its callback; dead
//!    entries are pruned lazily on the next notification.
//!
//! # Failure Modes
//!
//! - Re-entrant `set()` from inside a subscriber callback panics
//!   (`RefCell` borrow rules). Re-entrant mutation indicates a bug in the
//!   subscriber graph, not a recoverable condition.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The OS-level color preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

type CallbackRc = Rc<dyn Fn(ColorScheme)>;
type CallbackWeak = Weak<dyn Fn(ColorScheme)>;

struct SignalInner {
    value: ColorScheme,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// A shared, version-tracked color-scheme value with change notification.
///
/// Cloning produces another handle to the **same** signal.
pub struct ColorSchemeSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl Clone for ColorSchemeSignal {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ColorSchemeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ColorSchemeSignal")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl ColorSchemeSignal {
    /// Create a signal with an initial scheme, version 0, no subscribers.
    #[must_use]
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                value: initial,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current scheme.
    #[must_use]
    pub fn get(&self) -> ColorScheme {
        self.inner.borrow().value
    }

    /// Monotonic version, incremented on every real change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Push a new scheme value. Equal values are a no-op.
    pub fn set(&self, value: ColorScheme) {
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
            // Prune dead subscribers while collecting live ones.
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };
        for cb in callbacks {
            cb(value);
        }
    }

    /// Subscribe to scheme changes. The callback fires on every change
    /// for as long as the returned guard is alive.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(ColorScheme) + 'static) -> SchemeSubscription {
        let rc: CallbackRc = Rc::new(callback);
        self.inner.borrow_mut().subscribers.push(Rc::downgrade(&rc));
        SchemeSubscription { _callback: rc }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

impl Default for ColorSchemeSignal {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

/// Guard keeping a subscription alive; dropping it detaches the callback.
pub struct SchemeSubscription {
    _callback: CallbackRc,
}

impl std::fmt::Debug for SchemeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SchemeSubscription")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
