#![forbid(unsafe_code)]

//! Portal visibility: a two-state machine with hysteresis.
//!
//! The portal layer is hard-hidden once the intro zoom has fully played
//! and re-shown when the user scrubs back. A single cutoff would flicker
//! under sub-pixel scroll jitter, so the gate keeps separate enter/exit
//! thresholds and only reports actual transitions — repeated updates at an
//! unchanged state produce no output at all.
//!
//! # Invariants
//!
//! 1. `enter <= exit` (enforced on construction).
//! 2. Initial state is `Visible`.
//! 3. [`VisibilityGate::update`] returns `Some` exactly when the state
//!    changed (write suppression is a correctness requirement: the host
//!    mutation is a hard show/hide toggle).
//!
//! # Failure Modes
//!
//! None — all operations are infallible.

use crate::logging::stage_trace;

/// Whether the portal layer is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalVisibility {
    /// Portal layer painted.
    Visible,
    /// Portal layer hidden after the intro has fully played.
    Hidden,
}

/// Hysteresis gate over normalized progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    state: PortalVisibility,
    enter: f64,
    exit: f64,
}

impl VisibilityGate {
    /// Default re-show threshold (backward crossing).
    pub const DEFAULT_ENTER: f64 = 0.18;

    /// Default hide threshold (forward crossing).
    pub const DEFAULT_EXIT: f64 = 0.22;

    /// Gate with the default hysteresis band.
    #[must_use]
    pub fn new() -> Self {
        Self::with_thresholds(Self::DEFAULT_ENTER, Self::DEFAULT_EXIT)
    }

    /// Gate with explicit thresholds. `enter` is capped at `exit` so the
    /// band can never invert.
    #[must_use]
    pub fn with_thresholds(enter: f64, exit: f64) -> Self {
        Self {
            state: PortalVisibility::Visible,
            enter: enter.min(exit),
            exit,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> PortalVisibility {
        self.state
    }

    /// Feed one progress value. Returns the new state only when it
    /// changed; `None` means the host must not be touched.
    pub fn update(&mut self, progress: f64) -> Option<PortalVisibility> {
        let next = match self.state {
            PortalVisibility::Visible if progress > self.exit => PortalVisibility::Hidden,
            PortalVisibility::Hidden if progress <= self.enter => PortalVisibility::Visible,
            unchanged => unchanged,
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        stage_trace!(progress, state = ?next, "portal visibility changed");
        Some(next)
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
