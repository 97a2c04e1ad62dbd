#![forbid(unsafe_code)]

//! Easing functions for phase-local progress.
//!
//! All easings map [0.0, 1.0] → [0.0, 1.0] with f(0) = 0 and f(1) = 1 and
//! are monotonic on that interval, so a phase's transform interpolation is
//! reversible under backward scrubbing.

/// An easing function applied to phase-local progress.
pub type EasingFn = fn(f64) -> f64;

/// Identity easing. Scrub-locked phases (panel slides, vertical reveals)
/// use this so on-screen displacement tracks scroll distance exactly.
#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic ease-in: slow start, accelerating finish.
#[inline]
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Quadratic ease-out: fast start, decelerating finish.
#[inline]
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}
