//! The concrete widget painters.
//!
//! Each widget is an [`InstrumentPainter`](crate::instrument::InstrumentPainter)
//! implementation, nothing more: all lifecycle, smoothing, and dirty logic
//! lives in [`crate::instrument`]. The painters only turn a display value
//! into pixels on their two layers.

pub mod bar;
pub mod gauge;
pub mod readout;

pub use bar::BarPainter;
pub use gauge::GaugePainter;
pub use readout::ReadoutPainter;

use core::fmt::Write;

use heapless::String;

/// Format a display value with no decimals into a stack buffer.
/// Falls back to empty on overflow, which draws as nothing.
pub(crate) fn format_whole(value: f32) -> String<12> {
    let mut buf = String::new();
    write!(buf, "{value:.0}").ok();
    buf
}
