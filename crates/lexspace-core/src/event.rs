#![forbid(unsafe_code)]

//! Raw input event model consumed by the drag controller.
//!
//! These types mirror what the host event loop delivers: pointer and touch
//! events carrying a horizontal client coordinate, and keyboard resize keys
//! with modifier state. Pixel-to-percent conversion is the drag
//! controller's job; nothing here knows about container width.
//!
//! # Invariants
//!
//! 1. Mouse and touch share one event shape ([`PointerEvent`]); touch
//!    events additionally carry a [`TouchId`] so a session can track its
//!    first active touch and ignore the rest.
//! 2. Coordinates are client-space pixels along the resize axis.

use bitflags::bitflags;

/// Identifier of an active touch point, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u32);

/// Where a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen: there is only ever one.
    Mouse,
    /// A touch point with its host-assigned identifier.
    Touch(TouchId),
}

impl PointerKind {
    /// The touch id, if this is a touch pointer.
    #[must_use]
    pub const fn touch_id(self) -> Option<TouchId> {
        match self {
            Self::Mouse => None,
            Self::Touch(id) => Some(id),
        }
    }
}

/// Lifecycle phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer pressed (mouse-down / touch-start).
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released (mouse-up / touch-end).
    Up,
    /// Interaction aborted by the host (touch-cancel, capture loss).
    Cancel,
}

/// A single pointer event along the horizontal resize axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    /// Client-space x coordinate in pixels.
    pub x: f32,
}

impl PointerEvent {
    /// Convenience constructor for mouse events.
    #[must_use]
    pub const fn mouse(phase: PointerPhase, x: f32) -> Self {
        Self {
            kind: PointerKind::Mouse,
            phase,
            x,
        }
    }

    /// Convenience constructor for touch events.
    #[must_use]
    pub const fn touch(id: TouchId, phase: PointerPhase, x: f32) -> Self {
        Self {
            kind: PointerKind::Touch(id),
            phase,
            x,
        }
    }
}

bitflags! {
    /// Keyboard modifier state at the time of a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Arrow keys that move a divider when it has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKey {
    /// Move the divider left (shrink the panel before it).
    Left,
    /// Move the divider right (grow the panel before it).
    Right,
}

impl ResizeKey {
    /// Sign of the width delta this key produces: left is negative.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
