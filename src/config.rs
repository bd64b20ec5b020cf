//! Cluster layout constants and per-instrument configuration.
//!
//! # Pre-computed Layout Constants
//!
//! Layout calculations like `SCREEN_WIDTH - GAUGE_WIDTH` are computed at
//! compile time as `const`, avoiding per-frame arithmetic. The demo binary
//! places its three instruments with these constants; the library itself is
//! layout-agnostic and only sees the container each host passes to
//! [`Instrument::frame`](crate::instrument::Instrument::frame).
//!
//! # InstrumentOptions
//!
//! [`InstrumentOptions`] is the declarative configuration channel: value
//! range, angular sweep, damping, and display strings. It rarely changes
//! after mount; when it does (via `Instrument::configure`), validation runs
//! first and an invalid set of options is rejected wholesale with the
//! previous configuration retained.

use std::time::Duration;

use heapless::String;

use crate::error::ConfigError;

// =============================================================================
// Display Configuration
// =============================================================================

/// Cluster width in logical pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Cluster height in logical pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Upper bound for the device pixel scale applied to layer buffers.
/// Caps memory/CPU on high-density outputs: a surface never allocates more
/// than `scale^2` = 4x the logical pixel count.
pub const MAX_PIXEL_SCALE: u32 = 2;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The demo loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Pre-computed Layout Constants (demo cluster arrangement)
// =============================================================================

/// Width of the speed gauge container (left side, square-ish).
pub const GAUGE_WIDTH: u32 = 220;

/// Width of the right-hand column (power bar + readout).
pub const SIDE_WIDTH: u32 = SCREEN_WIDTH - GAUGE_WIDTH;

/// Height of the power bar container (top of the right column).
pub const BAR_HEIGHT: u32 = 120;

/// Height of the distance readout container (bottom of the right column).
pub const READOUT_HEIGHT: u32 = SCREEN_HEIGHT - BAR_HEIGHT;

// =============================================================================
// Smoothing Defaults
// =============================================================================

/// Default easing factor: each tick moves the display value 15% of the
/// remaining distance toward the target. At 50 FPS a step settles visually
/// in roughly half a second.
pub const DEFAULT_DAMPING: f32 = 0.15;

/// Convergence epsilon as a fraction of the configured range span (0.1%).
/// Below this distance the display snaps to the target, preventing endless
/// sub-pixel redraws.
pub const EPSILON_RANGE_FRACTION: f32 = 0.001;

// =============================================================================
// Instrument Options
// =============================================================================

/// Maximum length of an instrument label ("SPEED", "POWER", "TRIP").
pub const LABEL_LEN: usize = 16;

/// Maximum length of a unit string ("km/h", "kW", "km").
pub const UNIT_LEN: usize = 8;

/// Declarative configuration for one instrument.
///
/// Angles follow the screen convention used throughout this crate: degrees
/// measured clockwise from the 3 o'clock position (see [`crate::angle`]).
/// `start_deg`/`end_deg` are only consulted by angular painters (the gauge);
/// linear painters (bar, readout) ignore them.
#[derive(Clone, Debug, PartialEq)]
pub struct InstrumentOptions {
    /// Lower bound of the value range. Values below clamp to this.
    pub min: f32,
    /// Upper bound of the value range. Must be strictly greater than `min`.
    pub max: f32,
    /// Sweep start angle in degrees (value == min).
    pub start_deg: f32,
    /// Sweep end angle in degrees (value == max).
    pub end_deg: f32,
    /// Easing factor in (0, 1]. 1.0 disables smoothing (snap to target).
    pub damping: f32,
    /// Short label drawn on the static layer.
    pub label: String<LABEL_LEN>,
    /// Unit string drawn next to the value.
    pub unit: String<UNIT_LEN>,
}

impl Default for InstrumentOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            start_deg: -210.0,
            end_deg: 30.0,
            damping: DEFAULT_DAMPING,
            label: String::new(),
            unit: String::new(),
        }
    }
}

impl InstrumentOptions {
    /// Validate the options, rejecting them wholesale on the first problem.
    ///
    /// Checks:
    /// - `min` and `max` are finite
    /// - `min < max`
    /// - `damping` is in (0, 1]
    ///
    /// Angles are not range-restricted: reversed sweeps (`start_deg >
    /// end_deg`) are legal and map monotonically downward.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBound { min: self.min, max: self.max });
        }
        if self.min >= self.max {
            return Err(ConfigError::InvalidRange { min: self.min, max: self.max });
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::InvalidDamping { damping: self.damping });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(InstrumentOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let opts = InstrumentOptions { min: 10.0, max: 10.0, ..Default::default() };
        assert!(
            matches!(opts.validate(), Err(ConfigError::InvalidRange { .. })),
            "min == max should be rejected"
        );

        let opts = InstrumentOptions { min: 50.0, max: 10.0, ..Default::default() };
        assert!(
            matches!(opts.validate(), Err(ConfigError::InvalidRange { .. })),
            "min > max should be rejected"
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_bounds() {
        let opts = InstrumentOptions { min: f32::NAN, ..Default::default() };
        assert!(matches!(opts.validate(), Err(ConfigError::NonFiniteBound { .. })));

        let opts = InstrumentOptions { max: f32::INFINITY, ..Default::default() };
        assert!(matches!(opts.validate(), Err(ConfigError::NonFiniteBound { .. })));
    }

    #[test]
    fn test_validate_damping_bounds() {
        for bad in [0.0, -0.1, 1.5, f32::NAN] {
            let opts = InstrumentOptions { damping: bad, ..Default::default() };
            assert!(
                matches!(opts.validate(), Err(ConfigError::InvalidDamping { .. })),
                "damping {bad} should be rejected"
            );
        }

        // 1.0 is legal: snap-to-target mode
        let opts = InstrumentOptions { damping: 1.0, ..Default::default() };
        assert!(opts.validate().is_ok(), "damping 1.0 disables smoothing but is valid");
    }

    #[test]
    fn test_reversed_sweep_is_valid() {
        let opts = InstrumentOptions { start_deg: 40.0, end_deg: -220.0, ..Default::default() };
        assert!(opts.validate().is_ok(), "reversed angular sweep is a valid configuration");
    }

    #[test]
    fn test_layout_constants_cover_screen() {
        assert_eq!(GAUGE_WIDTH + SIDE_WIDTH, SCREEN_WIDTH);
        assert_eq!(BAR_HEIGHT + READOUT_HEIGHT, SCREEN_HEIGHT);
    }
}
