//! Error taxonomy for the instrument cluster.
//!
//! Two error families with different delivery paths:
//!
//! - [`ConfigError`] is returned synchronously from
//!   `Instrument::configure`. The caller sees it immediately and the
//!   instrument keeps its previous valid configuration.
//! - [`SetupError`] happens while surface setup is in flight, possibly
//!   frames after `mount()` was called. It is delivered once through the
//!   registered error hook, never thrown into the host's frame loop.
//!
//! Value-input problems (NaN, infinity, out-of-range) are not errors at
//! all: they are clamped or rejected locally in [`crate::smoothing`] with a
//! `warn!` log, because a bad sensor sample should degrade one reading, not
//! break the instrument.

use thiserror::Error;

/// Rejected instrument configuration. The previous configuration stays
/// active whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// `min >= max`; the range would be empty or inverted.
    #[error("invalid value range: min {min} must be less than max {max}")]
    InvalidRange { min: f32, max: f32 },

    /// One of the bounds is NaN or infinite.
    #[error("non-finite range bound: min {min}, max {max}")]
    NonFiniteBound { min: f32, max: f32 },

    /// Damping outside (0, 1]. Zero would freeze the display forever,
    /// above one would overshoot.
    #[error("damping {damping} outside (0, 1]")]
    InvalidDamping { damping: f32 },
}

/// Render-surface setup failure. Terminal for the instrument: it moves to
/// a non-rendering state and reports this through its error hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    /// The host supplied a zero-area container, so there is nothing to
    /// allocate a drawing context for.
    #[error("cannot create render surface for empty container ({width}x{height})")]
    EmptyContainer { width: u32, height: u32 },
}
