//! Numeric readout painter (odometer / trip distance).
//!
//! The simplest painter: a framed box with a label on the static layer
//! and a large right-aligned number with one decimal on the dynamic
//! layer. Exists mostly to prove the painter abstraction scales down.

use core::fmt::Write;

use embedded_graphics::{
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::GRAY,
    config::InstrumentOptions,
    instrument::InstrumentPainter,
    styles::{LABEL_STYLE_ORANGE, LABEL_STYLE_WHITE, LEFT_ALIGNED, RIGHT_ALIGNED, VALUE_STYLE_WHITE},
    surface::FrameLayer,
};

const FRAME_INSET: i32 = 4;

/// Digits buffer: sign, six integer digits, point, one decimal.
type ValueBuf = String<12>;

/// Format the readout number with one decimal place.
pub(crate) fn format_distance(value: f32) -> ValueBuf {
    let mut buf = ValueBuf::new();
    write!(buf, "{value:.1}").ok();
    buf
}

/// Distance readout painter.
#[derive(Default)]
pub struct ReadoutPainter;

impl InstrumentPainter for ReadoutPainter {
    fn draw_static(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions) {
        let size = layer.size();

        Rectangle::new(
            Point::new(FRAME_INSET, FRAME_INSET),
            Size::new(
                size.width.saturating_sub(2 * FRAME_INSET as u32),
                size.height.saturating_sub(2 * FRAME_INSET as u32),
            ),
        )
        .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
        .draw(layer)
        .ok();

        Text::with_text_style(
            &options.label,
            Point::new(FRAME_INSET + 6, FRAME_INSET + 14),
            LABEL_STYLE_WHITE,
            LEFT_ALIGNED,
        )
        .draw(layer)
        .ok();
        Text::with_text_style(
            &options.unit,
            Point::new(size.width as i32 - FRAME_INSET - 6, size.height as i32 - FRAME_INSET - 8),
            LABEL_STYLE_ORANGE,
            RIGHT_ALIGNED,
        )
        .draw(layer)
        .ok();
    }

    fn draw_dynamic(&mut self, layer: &mut FrameLayer, _options: &InstrumentOptions, display: f32) {
        let size = layer.size();
        let text = format_distance(display);
        Text::with_text_style(
            &text,
            Point::new(size.width as i32 - FRAME_INSET - 6, size.height as i32 / 2 + 8),
            VALUE_STYLE_WHITE,
            RIGHT_ALIGNED,
        )
        .draw(layer)
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance_one_decimal() {
        assert_eq!(format_distance(0.0).as_str(), "0.0");
        assert_eq!(format_distance(1234.56).as_str(), "1234.6");
        assert_eq!(format_distance(99999.94).as_str(), "99999.9");
    }

    #[test]
    fn test_format_distance_fits_buffer() {
        // the largest value a 0..=999999 range produces still fits
        assert_eq!(format_distance(999999.0).as_str(), "999999.0");
    }
}
