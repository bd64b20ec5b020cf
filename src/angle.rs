//! Value-to-angle mapping for sweep gauges.
//!
//! Angles are degrees measured clockwise from the 3 o'clock position, the
//! natural convention for y-down screen coordinates: a point on a dial at
//! angle `a` and radius `r` sits at `(cx + r*cos(a), cy + r*sin(a))`. A
//! typical speedometer sweep therefore runs from -210 (lower left) through
//! -90 (straight up) to 30 (lower right).

use crate::smoothing::Range;

/// Map a value to its angle on a sweep.
///
/// Clamps `value` into `range`, normalizes, then linearly interpolates
/// between `start_deg` and `end_deg`. A degenerate range maps everything
/// to `start_deg`. Pure and monotonic: reversed sweeps (`start_deg >
/// end_deg`) produce monotonically decreasing angles.
#[inline]
pub fn value_to_angle(value: f32, range: Range, start_deg: f32, end_deg: f32) -> f32 {
    let t = range.normalize(value);
    start_deg + (end_deg - start_deg) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_midpoint_scenario() {
        // range 0..130 over a -220..40 sweep: value 65 points straight up
        let angle = value_to_angle(65.0, Range::new(0.0, 130.0), -220.0, 40.0);
        assert!((angle - (-90.0)).abs() < EPS, "midpoint of the sweep should be -90, got {angle}");
    }

    #[test]
    fn test_endpoints_map_to_sweep_bounds() {
        let range = Range::new(0.0, 260.0);
        assert!((value_to_angle(0.0, range, -210.0, 30.0) - (-210.0)).abs() < EPS);
        assert!((value_to_angle(260.0, range, -210.0, 30.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_out_of_range_values_clamp_to_sweep() {
        let range = Range::new(0.0, 100.0);
        assert_eq!(value_to_angle(-50.0, range, -210.0, 30.0), -210.0);
        assert_eq!(value_to_angle(500.0, range, -210.0, 30.0), 30.0);
    }

    #[test]
    fn test_monotonic_in_value() {
        let range = Range::new(0.0, 100.0);
        let mut prev = value_to_angle(0.0, range, -210.0, 30.0);
        for i in 1..=100 {
            let a = value_to_angle(i as f32, range, -210.0, 30.0);
            assert!(a >= prev, "angle must be monotonically increasing in value");
            prev = a;
        }
    }

    #[test]
    fn test_reversed_sweep_is_monotonically_decreasing() {
        let range = Range::new(0.0, 10.0);
        let lo = value_to_angle(2.0, range, 40.0, -220.0);
        let hi = value_to_angle(8.0, range, 40.0, -220.0);
        assert!(hi < lo);
    }

    #[test]
    fn test_degenerate_range_returns_start() {
        let flat = Range::new(7.0, 7.0);
        assert_eq!(value_to_angle(7.0, flat, -210.0, 30.0), -210.0);
        assert_eq!(value_to_angle(999.0, flat, -210.0, 30.0), -210.0);
    }
}
