#![forbid(unsafe_code)]

//! Scroll binding: pinned region ownership and progress normalization.
//!
//! The [`ScrollBinder`] sizes a pinned scroll region to the timeline's
//! total duration in pixels and converts raw scroll offsets into a
//! normalized progress value. On geometry rebuilds it re-derives the
//! region length while preserving the user's fractional progress, so a
//! resize never snaps the page back to the start.
//!
//! # Invariants
//!
//! 1. `progress` is a non-decreasing function of the raw offset for a
//!    fixed total length, always within [0.0, 1.0].
//! 2. `rebind` preserves fractional progress (best-effort visual
//!    continuity), not pixel position.
//! 3. The region is released exactly once, when the binder drops.
//!
//! # Failure Modes
//!
//! - Non-positive total length: progress pins to 0.0 (the page rests at
//!   its start state).
//! - Negative or overshooting offsets (rubber-banding hosts): clamped.

use crate::logging::stage_debug;

/// Host capability owning the pinned scroll region.
///
/// The binder calls [`set_length`](Self::set_length) on construction and
/// on every rebind, and [`release`](Self::release) exactly once at drop so
/// no listener outlives the binder.
pub trait ScrollRegion {
    /// Resize the pinned region to `px` pixels of scrollable length.
    fn set_length(&mut self, px: f64);

    /// Tear the region down, detaching any host-side listeners.
    fn release(&mut self);
}

/// Progress derived from one scroll event. Ephemeral: recomputed every
/// tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    /// Raw scroll offset as reported by the host, in pixels.
    pub raw_offset: f64,
    /// Normalized progress within [0.0, 1.0].
    pub progress: f64,
}

/// Binds a timeline's total duration to a pinned scroll region.
#[derive(Debug)]
pub struct ScrollBinder<R: ScrollRegion> {
    region: R,
    /// Region length in pixels == timeline total duration.
    total: f64,
    /// Last clamped scroll offset.
    offset: f64,
}

impl<R: ScrollRegion> ScrollBinder<R> {
    /// Bind `region` to `total` pixels of scroll distance.
    pub fn new(mut region: R, total: f64) -> Self {
        let total = total.max(0.0);
        region.set_length(total);
        Self {
            region,
            total,
            offset: 0.0,
        }
    }

    /// Process one scroll event. Synchronous and allocation-free: this
    /// runs at display refresh rate.
    pub fn on_scroll(&mut self, raw_offset: f64) -> ProgressState {
        self.offset = raw_offset.clamp(0.0, self.total);
        ProgressState {
            raw_offset,
            progress: self.progress(),
        }
    }

    /// Current normalized progress.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            0.0
        } else {
            (self.offset / self.total).clamp(0.0, 1.0)
        }
    }

    /// Current clamped offset in pixels.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Region length in pixels.
    #[inline]
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total
    }

    /// Re-derive the region length after a timeline rebuild, preserving
    /// the current fractional progress.
    pub fn rebind(&mut self, new_total: f64) {
        let fraction = self.progress();
        self.total = new_total.max(0.0);
        self.offset = fraction * self.total;
        self.region.set_length(self.total);
        stage_debug!(total = self.total, fraction, "scroll region rebound");
    }
}

impl<R: ScrollRegion> Drop for ScrollBinder<R> {
    fn drop(&mut self) {
        self.region.release();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
