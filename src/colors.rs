//! Color constants for the instrument cluster.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The layer buffers in [`crate::surface`] store this format directly, so
//! presenting a frame is a straight copy with no per-pixel conversion.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Background of every instrument face.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Primary text and needle color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Redline band on the speed gauge.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Drive (positive power) fill on the power bar.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue (0, 0, 31). Regen (negative power) fill on the power bar.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow (31, 63, 0). Peak markers and attention highlights.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange accent. Unit labels and secondary text.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for dial rims, tick marks, and frame boxes. Subtle enough to
/// read as chrome rather than data.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
