//! Value smoothing: a target value eased toward a displayed value.
//!
//! # Exponential Easing
//!
//! Every frame the displayed value moves a fixed fraction of the remaining
//! distance toward the target:
//!
//! ```text
//! display += (target - display) * damping
//! ```
//!
//! This converges asymptotically and never overshoots for damping in
//! (0, 1]. To keep the asymptote from generating endless sub-pixel
//! redraws, the display snaps to the target once the remaining distance
//! drops below an epsilon derived from the range span (0.1%).
//!
//! # Input Policy
//!
//! Finite out-of-range targets clamp silently to the range. NaN and
//! infinite targets are rejected outright with the previous target
//! retained: a single NaN fed into the easing arithmetic would poison
//! every subsequent frame.

use tracing::warn;

use crate::config::EPSILON_RANGE_FRACTION;

// =============================================================================
// Range
// =============================================================================

/// A validated, non-empty value range. Constructed only through
/// [`InstrumentOptions::validate`](crate::config::InstrumentOptions::validate),
/// so `min < max` and both bounds finite hold by the time one exists here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Span of the range. Positive for any validated range.
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Clamp a finite value into the range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Normalized position of `value` in the range, in [0, 1].
    /// A degenerate range (max == min) maps everything to 0.0.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if span == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span
    }
}

// =============================================================================
// SmoothedValue
// =============================================================================

/// Target/display pair with exponential easing.
#[derive(Clone, Copy, Debug)]
pub struct SmoothedValue {
    range: Range,
    target: f32,
    display: f32,
    damping: f32,
    epsilon: f32,
}

impl SmoothedValue {
    /// Create a smoother starting converged at `initial` (clamped).
    pub fn new(range: Range, damping: f32, initial: f32) -> Self {
        let start = range.clamp(initial);
        Self {
            range,
            target: start,
            display: start,
            damping,
            epsilon: range.span() * EPSILON_RANGE_FRACTION,
        }
    }

    #[inline]
    pub const fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub const fn display(&self) -> f32 {
        self.display
    }

    #[inline]
    pub const fn range(&self) -> Range {
        self.range
    }

    /// Set a new target value. Returns whether the effective target
    /// changed (the caller marks the dynamic layer dirty only then).
    ///
    /// Non-finite input is rejected and the previous target retained.
    /// Finite input clamps to the range; setting the target to its current
    /// value is a no-op returning `false`.
    pub fn set_target(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            warn!(value, "rejecting non-finite target value");
            return false;
        }
        let clamped = self.range.clamp(value);
        if clamped == self.target {
            return false;
        }
        self.target = clamped;
        true
    }

    /// Replace the range and damping after a reconfiguration. The current
    /// target and display re-clamp into the new range; epsilon rescales.
    pub fn reconfigure(&mut self, range: Range, damping: f32) {
        self.range = range;
        self.damping = damping;
        self.epsilon = range.span() * EPSILON_RANGE_FRACTION;
        self.target = range.clamp(self.target);
        self.display = range.clamp(self.display);
    }

    /// Advance the display one frame toward the target and return it.
    ///
    /// Safe to call when already converged: the display does not move.
    /// Within epsilon of the target, the display snaps to it exactly.
    pub fn tick(&mut self) -> f32 {
        let remaining = self.target - self.display;
        if remaining.abs() < self.epsilon {
            self.display = self.target;
            return self.display;
        }
        self.display += remaining * self.damping;
        // damping 1.0 lands exactly on target; make convergence exact
        // rather than leaving a rounding residue
        if (self.target - self.display).abs() < self.epsilon {
            self.display = self.target;
        }
        self.display
    }

    /// True once the display has reached the target.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.display == self.target
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: Range = Range::new(0.0, 100.0);

    #[test]
    fn test_range_clamp_and_normalize() {
        assert_eq!(RANGE.clamp(-5.0), 0.0);
        assert_eq!(RANGE.clamp(150.0), 100.0);
        assert_eq!(RANGE.normalize(50.0), 0.5);
        assert_eq!(RANGE.normalize(-10.0), 0.0, "out-of-range input clamps before normalizing");
        assert_eq!(RANGE.normalize(200.0), 1.0);
    }

    #[test]
    fn test_degenerate_range_normalizes_to_zero() {
        let flat = Range::new(5.0, 5.0);
        assert_eq!(flat.normalize(5.0), 0.0);
        assert_eq!(flat.normalize(99.0), 0.0);
    }

    #[test]
    fn test_tick_converges_without_overshoot() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 0.0);
        assert!(sv.set_target(80.0));

        let mut prev = sv.display();
        for _ in 0..200 {
            let d = sv.tick();
            assert!(d >= prev, "display must approach the target monotonically");
            assert!(d <= 80.0, "display must never overshoot the target");
            prev = d;
            if sv.is_converged() {
                break;
            }
        }
        assert!(sv.is_converged(), "200 ticks at damping 0.15 must converge");
        assert_eq!(sv.display(), 80.0, "convergence snaps exactly to the target");
    }

    #[test]
    fn test_damping_one_snaps_in_one_tick() {
        let mut sv = SmoothedValue::new(RANGE, 1.0, 0.0);
        sv.set_target(42.0);
        sv.tick();
        assert_eq!(sv.display(), 42.0);
        assert!(sv.is_converged());
    }

    #[test]
    fn test_converged_tick_is_a_noop() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 30.0);
        assert!(sv.is_converged());
        let before = sv.display();
        sv.tick();
        assert_eq!(sv.display(), before, "ticking while converged must not move the display");
    }

    #[test]
    fn test_single_tick_moves_by_damping_fraction() {
        // range 0..130, target at midpoint, damping 0.15 from display 0
        let mut sv = SmoothedValue::new(Range::new(0.0, 130.0), 0.15, 0.0);
        sv.set_target(65.0);
        let d = sv.tick();
        assert!((d - 65.0 * 0.15).abs() < 1e-5, "one tick moves 15% of the distance, got {d}");
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 0.0);
        sv.set_target(50.0);

        assert!(!sv.set_target(f32::NAN), "NaN target must report no change");
        assert_eq!(sv.target(), 50.0, "NaN must not disturb the prior target");
        assert!(!sv.set_target(f32::INFINITY));
        assert!(!sv.set_target(f32::NEG_INFINITY));
        assert_eq!(sv.target(), 50.0);
    }

    #[test]
    fn test_out_of_range_target_clamps() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 0.0);
        assert!(sv.set_target(250.0));
        assert_eq!(sv.target(), 100.0);
        assert!(!sv.set_target(300.0), "re-clamping to the same bound is a no-op");
    }

    #[test]
    fn test_last_target_wins_before_tick() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 0.0);
        sv.set_target(10.0);
        sv.set_target(20.0);
        sv.set_target(30.0);
        assert_eq!(sv.target(), 30.0);
        assert_eq!(sv.display(), 0.0, "display only moves on tick");
    }

    #[test]
    fn test_no_dirty_signal_for_unchanged_target() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 25.0);
        assert!(!sv.set_target(25.0), "setting the current value must not report a change");
    }

    #[test]
    fn test_reconfigure_reclamps_state() {
        let mut sv = SmoothedValue::new(RANGE, 0.15, 90.0);
        sv.set_target(95.0);
        sv.reconfigure(Range::new(0.0, 50.0), 0.3);
        assert_eq!(sv.target(), 50.0);
        assert_eq!(sv.display(), 50.0);
    }
}
