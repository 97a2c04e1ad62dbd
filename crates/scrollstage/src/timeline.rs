#![forbid(unsafe_code)]

//! Timeline: phases composed on one monotonic progress axis.
//!
//! A [`Timeline`] owns the ordered phase table produced by
//! [`PhaseBuilder`](crate::phase::PhaseBuilder) and evaluates it at a
//! normalized progress value, producing one [`TargetFrame`]. Evaluation is
//! a pure function of progress: no internal counters advance, so repeated
//! evaluation at the same progress is bit-identical and backward scrubbing
//! replays every phase symmetrically.
//!
//! # Invariants
//!
//! 1. Phases are sorted by start offset (stable, preserving insertion
//!    order inside overlap groups).
//! 2. `total_duration == max(phase.end())` over all phases, 0.0 when
//!    empty.
//! 3. `evaluate(0.0)` yields every target's exact start transform;
//!    `evaluate(1.0)` the exact end transforms.
//! 4. A zero-duration phase evaluates at its end state once reached —
//!    never a division by zero.
//!
//! # Failure Modes
//!
//! - Out-of-range progress: clamped to [0.0, 1.0].
//! - Empty timeline: every evaluation returns the identity frame.

use crate::phase::{Phase, PhaseKind};
use crate::target::{EffectTarget, TargetFrame};

/// An ordered phase table with a fixed total scroll distance.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Phases sorted by start offset.
    phases: Vec<Phase>,
    /// Scroll distance covered by the whole timeline, in pixels.
    total_duration: f64,
    /// Per-target state before any phase has started.
    initial: TargetFrame,
}

impl Timeline {
    /// Build a timeline from phases, sorting by start offset and deriving
    /// the total duration and the initial frame.
    #[must_use]
    pub fn from_phases(mut phases: Vec<Phase>) -> Self {
        phases.sort_by(|a, b| a.start.total_cmp(&b.start));

        let total_duration = phases.iter().map(Phase::end).fold(0.0, f64::max);

        // Each target's resting state is the `from` of its earliest phase.
        let mut initial = TargetFrame::IDENTITY;
        let mut seen = [false; EffectTarget::COUNT];
        for phase in &phases {
            let idx = phase.target.index();
            if !seen[idx] {
                seen[idx] = true;
                initial.set(phase.target, phase.from);
            }
        }

        Self {
            phases,
            total_duration,
            initial,
        }
    }

    /// Total scroll distance in pixels.
    #[inline]
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// The phase table, sorted by start offset.
    #[inline]
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Number of phases.
    #[inline]
    #[must_use]
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Number of phases of one kind.
    #[must_use]
    pub fn count_of_kind(&self, kind: PhaseKind) -> usize {
        self.phases.iter().filter(|p| p.kind == kind).count()
    }

    /// The frame every target rests in before any scrolling.
    #[inline]
    #[must_use]
    pub fn initial_frame(&self) -> TargetFrame {
        self.initial
    }

    /// Evaluate every phase at a normalized progress in [0.0, 1.0].
    ///
    /// For each phase whose start has been reached, phase-local progress is
    /// `(t - start) / duration` clamped to [0.0, 1.0] (1.0 for
    /// zero-duration phases), eased, then interpolated. Later phases on
    /// the same target overwrite earlier, finished ones; per-target
    /// temporal disjointness makes that the held end state. Targets whose
    /// first phase has not started hold their initial state.
    ///
    /// Pure and allocation-free; safe to call at display refresh rate.
    #[must_use]
    pub fn evaluate(&self, progress: f64) -> TargetFrame {
        let t = progress.clamp(0.0, 1.0) * self.total_duration;
        let mut frame = self.initial;

        for phase in &self.phases {
            if t < phase.start {
                // Sorted by start: nothing later has started either.
                break;
            }
            let local = if phase.duration > 0.0 {
                ((t - phase.start) / phase.duration).min(1.0)
            } else {
                1.0
            };
            let eased = (phase.easing)(local);
            frame.set(phase.target, phase.from.lerp(phase.to, eased));
        }

        frame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
