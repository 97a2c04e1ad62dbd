#![forbid(unsafe_code)]

//! Effect targets, transform state, and the single write path.
//!
//! Each visual layer the compositor drives is one [`EffectTarget`]. The
//! host resolves its layer handles once at construction into an
//! [`EffectTargetRegistry`]; the [`TransformApplier`] is then the only code
//! that writes transform state out, through an injected [`TransformSink`].
//!
//! # Invariants
//!
//! 1. Every target owns exactly one current [`TransformState`]; only the
//!    applier mutates the host side.
//! 2. A target with no registered handle is a skipped layer, never an
//!    error (the animation degrades, it does not crash).
//! 3. Applying the same [`TargetFrame`] twice is idempotent: the sink
//!    receives identical values.
//!
//! # Failure Modes
//!
//! None — all operations are infallible.

use ahash::AHashMap;

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// A visual layer driven by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    /// Background image layer (slowest parallax).
    Background,
    /// Star layer (mid parallax).
    Stars,
    /// Logo image relocating into the navigation bar.
    Logo,
    /// Portal mask opening during the intro zoom.
    PortalMask,
    /// Portal text in front of the mask (zooms past the camera).
    PortalFrontText,
    /// Portal text behind the mask (revealed by the zoom).
    PortalBackText,
    /// Horizontal container holding the content panels.
    PanelContainer,
    /// Inner content of a vertically scrolling panel.
    VerticalContent,
}

impl EffectTarget {
    /// All targets, in applier write order.
    pub const ALL: [EffectTarget; 8] = [
        EffectTarget::Background,
        EffectTarget::Stars,
        EffectTarget::Logo,
        EffectTarget::PortalMask,
        EffectTarget::PortalFrontText,
        EffectTarget::PortalBackText,
        EffectTarget::PanelContainer,
        EffectTarget::VerticalContent,
    ];

    /// Number of targets.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index for frame storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Transform state
// ---------------------------------------------------------------------------

/// Transform written to one layer: translation, uniform scale, opacity.
///
/// Translation and scale on the same target compose independently; phases
/// never write conflicting sub-properties at the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Opacity in [0.0, 1.0].
    pub opacity: f64,
}

impl TransformState {
    /// Untransformed state: no translation, scale 1, fully opaque.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Pure horizontal translation.
    #[inline]
    #[must_use]
    pub const fn translate_x(x: f64) -> Self {
        Self {
            x,
            y: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Pure vertical translation.
    #[inline]
    #[must_use]
    pub const fn translate_y(y: f64) -> Self {
        Self {
            x: 0.0,
            y,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Scale and opacity with no translation.
    #[inline]
    #[must_use]
    pub const fn scaled(scale: f64, opacity: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale,
            opacity,
        }
    }

    /// Componentwise linear interpolation toward `other`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
            opacity: self.opacity + (other.opacity - self.opacity) * t,
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// One evaluated transform per target: the complete output of a single
/// timeline evaluation. `Copy`, fixed-size, so the per-scroll-tick path
/// never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFrame {
    states: [TransformState; EffectTarget::COUNT],
}

impl TargetFrame {
    /// A frame with every target at identity.
    pub const IDENTITY: Self = Self {
        states: [TransformState::IDENTITY; EffectTarget::COUNT],
    };

    /// State for one target.
    #[inline]
    #[must_use]
    pub fn get(&self, target: EffectTarget) -> TransformState {
        self.states[target.index()]
    }

    /// Overwrite one target's state.
    #[inline]
    pub fn set(&mut self, target: EffectTarget, state: TransformState) {
        self.states[target.index()] = state;
    }
}

impl Default for TargetFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps logical targets to host layer handles, resolved once at
/// construction. Decouples the compositor from incidental host structure:
/// the compositor never queries the host, it only holds handles.
#[derive(Debug, Clone, Default)]
pub struct EffectTargetRegistry<H> {
    handles: AHashMap<EffectTarget, H>,
}

impl<H> EffectTargetRegistry<H> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handles: AHashMap::new(),
        }
    }

    /// Register a handle for a target (builder pattern). Re-registering a
    /// target replaces the previous handle.
    #[must_use]
    pub fn with(mut self, target: EffectTarget, handle: H) -> Self {
        self.handles.insert(target, handle);
        self
    }

    /// Register a handle for a target.
    pub fn register(&mut self, target: EffectTarget, handle: H) {
        self.handles.insert(target, handle);
    }

    /// Handle for a target, if one was registered.
    #[inline]
    #[must_use]
    pub fn get(&self, target: EffectTarget) -> Option<&H> {
        self.handles.get(&target)
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sink and applier
// ---------------------------------------------------------------------------

/// The injected apply capability: the one function mapping
/// `(handle, transform)` to a host side effect. Keeping this behind a trait
/// makes the whole progress-to-transform mapping testable without a
/// rendering surface.
pub trait TransformSink {
    /// Host-side layer handle type.
    type Handle;

    /// Write one transform state to one layer.
    fn apply(&mut self, handle: &Self::Handle, state: &TransformState);
}

/// The single write path from evaluated frames to the host.
pub struct TransformApplier<S: TransformSink> {
    registry: EffectTargetRegistry<S::Handle>,
    sink: S,
}

impl<S: TransformSink> std::fmt::Debug for TransformApplier<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformApplier")
            .field("registered", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl<S: TransformSink> TransformApplier<S> {
    /// Create an applier over a resolved registry and a sink.
    pub fn new(registry: EffectTargetRegistry<S::Handle>, sink: S) -> Self {
        Self { registry, sink }
    }

    /// Write every registered target's state from `frame` to the sink.
    ///
    /// Unregistered targets are skipped. O(targets), no allocation.
    pub fn apply_frame(&mut self, frame: &TargetFrame) {
        for target in EffectTarget::ALL {
            if let Some(handle) = self.registry.get(target) {
                self.sink.apply(handle, &frame.get(target));
            }
        }
    }

    /// Shared access to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
