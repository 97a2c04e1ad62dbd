#![forbid(unsafe_code)]

//! Scroll-synchronized animation timeline compositor.
//!
//! # Role
//! `scrollstage` maps user scroll progress within a pinned viewport onto a
//! composite animation timeline: a portal zoom intro, a logo transit into a
//! navigation-bar slot, a horizontal slide through content panels with
//! parallax background layers, and nested vertical reveals inside panels.
//!
//! # Primary responsibilities
//! - **PhaseBuilder**: turns measured panel geometry into scroll-distance
//!   phases on one monotonic progress axis.
//! - **Timeline**: pure, allocation-free evaluation of every active phase
//!   at a given progress value.
//! - **ScrollBinder**: owns the pinned scroll region and normalizes raw
//!   scroll offsets into progress, surviving geometry rebuilds.
//! - **TransformApplier**: the single write path from evaluated transform
//!   states to host-owned layer handles.
//! - **VisibilityGate**: hysteresis show/hide machine for the portal layer.
//!
//! # How it fits together
//! A host implements [`GeometryProbe`], [`ScrollRegion`], and
//! [`TransformSink`], registers its layer handles in an
//! [`EffectTargetRegistry`], and mounts a [`Stage`]. The stage rebuilds the
//! timeline on resize only; scroll handling is synchronous, O(phases), and
//! allocation-free so it can run at display refresh rate.

pub mod binder;
pub mod easing;
pub mod geometry;
mod logging;
pub mod phase;
pub mod stage;
pub mod target;
pub mod timeline;
pub mod visibility;

pub use binder::{ProgressState, ScrollBinder, ScrollRegion};
pub use easing::EasingFn;
pub use geometry::Rect;
pub use phase::{PanelDescriptor, Phase, PhaseBuilder, PhaseKind, VerticalReveal};
pub use stage::{GeometryProbe, Stage, StageUpdate};
pub use target::{
    EffectTarget, EffectTargetRegistry, TargetFrame, TransformApplier, TransformSink,
    TransformState,
};
pub use timeline::Timeline;
pub use visibility::{PortalVisibility, VisibilityGate};
