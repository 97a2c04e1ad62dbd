#![forbid(unsafe_code)]

//! Phase model and the builder that derives phases from layout geometry.
//!
//! A [`Phase`] is one scroll-distance interval with one transform effect on
//! one target. [`PhaseBuilder::build`] turns ordered panel descriptors plus
//! measured geometry into a [`Timeline`]: intro zoom, logo transit,
//! horizontal slides with parallax companions, and nested vertical reveals,
//! all on a single monotonic scroll-distance axis.
//!
//! # Invariants
//!
//! 1. Phase durations are never negative; zero-width panels contribute a
//!    zero-duration no-op slide, not an error.
//! 2. Phases sharing an overlap group share a start offset and run
//!    concurrently; the sequential cursor advances past the group's max
//!    end, so concurrent durations count once toward the total.
//! 3. Appending a panel never shrinks the total duration; removing one
//!    shrinks it correspondingly on rebuild.
//! 4. Phases touching the same target are temporally disjoint, so frame
//!    evaluation never merges conflicting writes.
//!
//! # Failure Modes
//!
//! - Missing navigation slot: the logo transit falls back to
//!   [`DEFAULT_NAV_SLOT`] instead of failing.
//! - Zero viewport height: intro and transit degenerate to zero-duration
//!   (instantaneous) phases; evaluation guards the division.

use crate::easing::{self, EasingFn};
use crate::geometry::Rect;
use crate::logging::stage_debug;
use crate::target::{EffectTarget, TransformState};
use crate::timeline::Timeline;

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Background layer displacement as a fraction of panel displacement.
pub const BACKGROUND_PARALLAX: f64 = 0.15;

/// Star layer displacement as a fraction of panel displacement.
pub const STAR_PARALLAX: f64 = 0.25;

/// Fallback navigation-bar logo slot when the host reports none.
pub const DEFAULT_NAV_SLOT: Rect = Rect::new(24.0, 16.0, 160.0, 48.0);

/// Scale of the logo once parked in the navigation bar.
pub const LOGO_NAV_SCALE: f64 = 0.35;

/// Front portal text zooms past the camera to this scale while fading out.
const FRONT_TEXT_END_SCALE: f64 = 8.0;

/// The portal mask opens to this scale over the intro.
const MASK_END_SCALE: f64 = 12.0;

/// Back portal text grows from this scale to 1.0 while fading in.
const BACK_TEXT_START_SCALE: f64 = 0.6;

/// Overlap group of the three concurrent intro effects.
const INTRO_GROUP: u32 = 0;

/// Overlap group shared by the logo transit and the first panel slide.
const TRANSIT_GROUP: u32 = 1;

// ---------------------------------------------------------------------------
// Panel descriptors
// ---------------------------------------------------------------------------

/// Nested vertical sub-scroll inside a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalReveal {
    /// Measured height of the panel's inner content in pixels.
    pub content_height: f64,
    /// Scroll-distance multiplier: reveal duration per pixel of overflow.
    pub multiplier: f64,
}

impl VerticalReveal {
    /// A reveal with the default 1:1 multiplier.
    #[must_use]
    pub const fn new(content_height: f64) -> Self {
        Self {
            content_height,
            multiplier: 1.0,
        }
    }

    /// Set the scroll-distance multiplier (builder pattern).
    #[must_use]
    pub const fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// One content panel as measured for the current layout pass.
///
/// Immutable per pass; rebuilt whenever geometry changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDescriptor {
    /// Stable panel identifier, used for diagnostics only.
    pub id: usize,
    /// Measured width in pixels. Zero-width panels are legal spacers.
    pub width: f64,
    /// Present when the panel hosts a nested vertical reveal.
    pub vertical: Option<VerticalReveal>,
}

impl PanelDescriptor {
    /// A plain horizontal panel.
    #[must_use]
    pub const fn new(id: usize, width: f64) -> Self {
        Self {
            id,
            width,
            vertical: None,
        }
    }

    /// Attach a vertical reveal (builder pattern).
    #[must_use]
    pub const fn with_vertical(mut self, reveal: VerticalReveal) -> Self {
        self.vertical = Some(reveal);
        self
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// What a phase animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// Portal zoom-in: front text, mask, and back text, concurrently.
    Intro,
    /// Logo relocating from page center to the navigation-bar slot.
    LogoTransit,
    /// One panel sliding out of view (plus parallax companions).
    HorizontalSlide,
    /// Nested vertical reveal pausing the horizontal sequence.
    VerticalSlide,
}

/// One scroll-distance interval animating one target from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    /// Absolute start offset on the scroll-distance axis, in pixels.
    pub start: f64,
    /// Scroll distance this phase spans. Always >= 0; zero means the
    /// effect is instantaneous.
    pub duration: f64,
    /// Effect classification.
    pub kind: PhaseKind,
    /// The layer this phase writes.
    pub target: EffectTarget,
    /// Easing applied to phase-local progress.
    pub easing: EasingFn,
    /// Transform at phase start.
    pub from: TransformState,
    /// Transform at phase end.
    pub to: TransformState,
    /// Phases in the same group share a start offset and run concurrently.
    pub group: Option<u32>,
}

impl Phase {
    /// Absolute end offset.
    #[inline]
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Computes phase durations and offsets from measured geometry.
///
/// Built once per layout pass (mount and resize), never per scroll tick.
#[derive(Debug, Clone, Copy)]
pub struct PhaseBuilder {
    viewport: Rect,
    nav_slot: Option<Rect>,
}

impl PhaseBuilder {
    /// Builder for the given viewport.
    #[must_use]
    pub const fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            nav_slot: None,
        }
    }

    /// Set the navigation-bar logo slot (builder pattern). Without it the
    /// logo transit targets [`DEFAULT_NAV_SLOT`].
    #[must_use]
    pub const fn nav_slot(mut self, slot: Rect) -> Self {
        self.nav_slot = Some(slot);
        self
    }

    /// Assemble the timeline for the given ordered panels.
    ///
    /// One full viewport height of scroll is dedicated to the intro zoom
    /// and another to the logo transit; the transit shares its interval
    /// with the first panel's slide. Each remaining panel except the last
    /// contributes its width as slide distance, and vertical panels whose
    /// content overflows the viewport insert a reveal that pauses the
    /// horizontal sequence at that panel's position.
    #[must_use]
    pub fn build(&self, panels: &[PanelDescriptor]) -> Timeline {
        let vh = self.viewport.height.max(0.0);
        let mut phases = Vec::with_capacity(5 + panels.len() * 4);

        // Intro: three concurrent effects over one viewport height. Only
        // their rates differ, which is what produces the parallax depth.
        phases.push(Phase {
            start: 0.0,
            duration: vh,
            kind: PhaseKind::Intro,
            target: EffectTarget::PortalFrontText,
            easing: easing::ease_in,
            from: TransformState::scaled(1.0, 1.0),
            to: TransformState::scaled(FRONT_TEXT_END_SCALE, 0.0),
            group: Some(INTRO_GROUP),
        });
        phases.push(Phase {
            start: 0.0,
            duration: vh,
            kind: PhaseKind::Intro,
            target: EffectTarget::PortalMask,
            easing: easing::ease_in,
            from: TransformState::scaled(1.0, 1.0),
            to: TransformState::scaled(MASK_END_SCALE, 1.0),
            group: Some(INTRO_GROUP),
        });
        phases.push(Phase {
            start: 0.0,
            duration: vh,
            kind: PhaseKind::Intro,
            target: EffectTarget::PortalBackText,
            easing: easing::ease_in,
            from: TransformState::scaled(BACK_TEXT_START_SCALE, 0.0),
            to: TransformState::scaled(1.0, 1.0),
            group: Some(INTRO_GROUP),
        });

        // Logo transit: sequential after the intro, concurrent with the
        // first panel slide. The logo starts at the viewport center and
        // parks at the nav slot's center.
        let transit_start = vh;
        let slot = self.nav_slot.unwrap_or(DEFAULT_NAV_SLOT);
        let (vx, vy) = self.viewport.center();
        let (sx, sy) = slot.center();
        phases.push(Phase {
            start: transit_start,
            duration: vh,
            kind: PhaseKind::LogoTransit,
            target: EffectTarget::Logo,
            easing: easing::ease_in_out,
            from: TransformState::IDENTITY,
            to: TransformState {
                x: sx - vx,
                y: sy - vy,
                scale: LOGO_NAV_SCALE,
                opacity: 1.0,
            },
            group: Some(TRANSIT_GROUP),
        });
        let transit_end = transit_start + vh;

        // Panels: running displacements for the container and both
        // parallax layers, one slide per panel except the last.
        let mut cursor = transit_start;
        let mut container_x = 0.0;
        let mut background_x = 0.0;
        let mut stars_x = 0.0;
        let last = panels.len().saturating_sub(1);

        for (index, panel) in panels.iter().enumerate() {
            // Vertical reveal plays before the panel slides away, pausing
            // the horizontal sequence at this panel's position.
            if let Some(reveal) = panel.vertical {
                let distance = (reveal.content_height - vh).max(0.0);
                if distance > 0.0 {
                    let duration = distance * reveal.multiplier;
                    phases.push(Phase {
                        start: cursor,
                        duration,
                        kind: PhaseKind::VerticalSlide,
                        target: EffectTarget::VerticalContent,
                        easing: easing::linear,
                        from: TransformState::translate_y(0.0),
                        to: TransformState::translate_y(-distance),
                        group: None,
                    });
                    cursor += duration;
                }
            }

            if index < last {
                let width = panel.width.max(0.0);
                // Slide #0 shares the transit's interval; all later slides
                // are strictly sequential.
                let (start, group) = if index == 0 {
                    (transit_start, Some(TRANSIT_GROUP))
                } else {
                    (cursor, None)
                };

                let from_x = container_x;
                container_x -= width;
                phases.push(Phase {
                    start,
                    duration: width,
                    kind: PhaseKind::HorizontalSlide,
                    target: EffectTarget::PanelContainer,
                    easing: easing::linear,
                    from: TransformState::translate_x(from_x),
                    to: TransformState::translate_x(container_x),
                    group,
                });

                // Parallax companions: same interval, scaled displacement.
                // A zero-width slide displaces nothing, so none are emitted.
                if width > 0.0 {
                    let bg_from = background_x;
                    background_x -= width * BACKGROUND_PARALLAX;
                    phases.push(Phase {
                        start,
                        duration: width,
                        kind: PhaseKind::HorizontalSlide,
                        target: EffectTarget::Background,
                        easing: easing::linear,
                        from: TransformState::translate_x(bg_from),
                        to: TransformState::translate_x(background_x),
                        group,
                    });

                    let stars_from = stars_x;
                    stars_x -= width * STAR_PARALLAX;
                    phases.push(Phase {
                        start,
                        duration: width,
                        kind: PhaseKind::HorizontalSlide,
                        target: EffectTarget::Stars,
                        easing: easing::linear,
                        from: TransformState::translate_x(stars_from),
                        to: TransformState::translate_x(stars_x),
                        group,
                    });
                }

                cursor = if index == 0 {
                    // Concurrent group: advance past whichever member ends
                    // last, counting the shared interval once.
                    cursor.max(start + width).max(transit_end)
                } else {
                    start + width
                };
            }
        }

        let timeline = Timeline::from_phases(phases);
        stage_debug!(
            panels = panels.len(),
            phases = timeline.phase_count(),
            total = timeline.total_duration(),
            "timeline built"
        );
        timeline
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
