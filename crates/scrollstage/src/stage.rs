#![forbid(unsafe_code)]

//! Composition root: probe → phases → timeline → binder → applier + gate.
//!
//! A [`Stage`] wires the whole pipeline once at mount and then services
//! exactly two entry points, both synchronous and delivered on the host's
//! UI thread: [`handle_scroll`](Stage::handle_scroll) (hot path, O(phases),
//! allocation-free) and [`handle_resize`](Stage::handle_resize) (rare;
//! re-probes geometry and rebuilds the timeline). Dropping the stage tears
//! the pinned scroll region down deterministically.
//!
//! # Invariants
//!
//! 1. The timeline is rebuilt on resize only, never per scroll tick.
//! 2. Scroll handling is reentrant-safe: repeated identical offsets
//!    produce identical frames and no spurious visibility output.
//! 3. A resize preserves the user's fractional progress.

use crate::binder::{ProgressState, ScrollBinder, ScrollRegion};
use crate::geometry::Rect;
use crate::logging::stage_debug;
use crate::phase::{PanelDescriptor, PhaseBuilder};
use crate::target::{EffectTargetRegistry, TransformApplier, TransformSink};
use crate::timeline::Timeline;
use crate::visibility::{PortalVisibility, VisibilityGate};

/// Layout measurement at composition time. Pure query, no state: called on
/// mount and on resize, never per scroll tick.
pub trait GeometryProbe {
    /// Ordered panel descriptors for the current layout.
    fn panels(&self) -> Vec<PanelDescriptor>;

    /// The navigation-bar logo slot, if the navigation bar is present.
    fn nav_slot(&self) -> Option<Rect>;

    /// Current viewport rectangle.
    fn viewport(&self) -> Rect;
}

/// Outcome of one scroll or resize pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageUpdate {
    /// Progress derived for this pass.
    pub progress: ProgressState,
    /// `Some` only when the portal visibility actually changed.
    pub portal: Option<PortalVisibility>,
}

/// The wired pipeline driving all effect layers from scroll progress.
pub struct Stage<P, R, S>
where
    P: GeometryProbe,
    R: ScrollRegion,
    S: TransformSink,
{
    probe: P,
    timeline: Timeline,
    binder: ScrollBinder<R>,
    applier: TransformApplier<S>,
    gate: VisibilityGate,
}

impl<P, R, S> std::fmt::Debug for Stage<P, R, S>
where
    P: GeometryProbe,
    R: ScrollRegion,
    S: TransformSink,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("total_duration", &self.timeline.total_duration())
            .field("progress", &self.binder.progress())
            .field("portal", &self.gate.state())
            .finish_non_exhaustive()
    }
}

impl<P, R, S> Stage<P, R, S>
where
    P: GeometryProbe,
    R: ScrollRegion,
    S: TransformSink,
{
    /// Probe geometry, build the timeline, bind the scroll region, and
    /// apply the initial frame so the page starts in its rest state.
    pub fn mount(
        probe: P,
        region: R,
        registry: EffectTargetRegistry<S::Handle>,
        sink: S,
    ) -> Self {
        let timeline = compose(&probe);
        let binder = ScrollBinder::new(region, timeline.total_duration());
        let mut stage = Self {
            probe,
            timeline,
            binder,
            applier: TransformApplier::new(registry, sink),
            gate: VisibilityGate::new(),
        };
        let frame = stage.timeline.evaluate(0.0);
        stage.applier.apply_frame(&frame);
        stage
    }

    /// Process one scroll event: derive progress, evaluate every active
    /// phase, write the resulting frame, and advance the visibility gate.
    pub fn handle_scroll(&mut self, raw_offset: f64) -> StageUpdate {
        let progress = self.binder.on_scroll(raw_offset);
        self.apply_at(progress)
    }

    /// Process a geometry change: re-probe, rebuild the timeline, rebind
    /// the scroll region preserving fractional progress, and re-apply one
    /// frame at the preserved position.
    pub fn handle_resize(&mut self) -> StageUpdate {
        self.timeline = compose(&self.probe);
        self.binder.rebind(self.timeline.total_duration());
        stage_debug!(
            total = self.timeline.total_duration(),
            "stage rebuilt after resize"
        );
        let progress = ProgressState {
            raw_offset: self.binder.offset(),
            progress: self.binder.progress(),
        };
        self.apply_at(progress)
    }

    fn apply_at(&mut self, progress: ProgressState) -> StageUpdate {
        let frame = self.timeline.evaluate(progress.progress);
        self.applier.apply_frame(&frame);
        let portal = self.gate.update(progress.progress);
        StageUpdate { progress, portal }
    }

    /// The current timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current portal visibility.
    #[must_use]
    pub fn portal_visibility(&self) -> PortalVisibility {
        self.gate.state()
    }

    /// Current normalized progress.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.binder.progress()
    }

    /// Shared access to the sink (useful for hosts that batch writes).
    #[must_use]
    pub fn sink(&self) -> &S {
        self.applier.sink()
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        self.applier.sink_mut()
    }
}

/// One layout pass: probe geometry and derive the phase table.
fn compose<P: GeometryProbe>(probe: &P) -> Timeline {
    let panels = probe.panels();
    let mut builder = PhaseBuilder::new(probe.viewport());
    if let Some(slot) = probe.nav_slot() {
        builder = builder.nav_slot(slot);
    }
    builder.build(&panels)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
