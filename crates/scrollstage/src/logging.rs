#![forbid(unsafe_code)]

//! Internal logging shims.
//!
//! With the `tracing` feature enabled these forward to the corresponding
//! `tracing` macros; otherwise they compile to nothing. Call sites stay
//! unconditional either way.

#[cfg(feature = "tracing")]
macro_rules! stage_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stage_debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "tracing")]
macro_rules! stage_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! stage_trace {
    ($($arg:tt)*) => {{}};
}

pub(crate) use {stage_debug, stage_trace};
