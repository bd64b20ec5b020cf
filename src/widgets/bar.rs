//! Power bar painter.
//!
//! A vertical bar with a zero line: positive display values fill green
//! upward from zero (drive), negative values fill blue downward (regen).
//! Ranges that do not straddle zero degenerate gracefully: the zero line
//! clamps to the bottom (all-positive range) or top of the bar.

use core::fmt::Write;

use embedded_graphics::{
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::{BLUE, GRAY, GREEN, WHITE},
    config::InstrumentOptions,
    instrument::InstrumentPainter,
    smoothing::Range,
    styles::{
        CENTERED, LABEL_STYLE_GRAY, LABEL_STYLE_ORANGE, LABEL_STYLE_WHITE, LEFT_ALIGNED,
        VALUE_STYLE_MEDIUM_WHITE,
    },
    surface::FrameLayer,
};

/// Horizontal inset of the bar track from the layer edges.
const TRACK_INSET_X: i32 = 34;

/// Vertical inset of the bar track (leaves room for labels).
const TRACK_INSET_Y: i32 = 18;

/// The bar track rectangle within a layer of the given size.
fn track(size: Size) -> Rectangle {
    Rectangle::new(
        Point::new(TRACK_INSET_X, TRACK_INSET_Y),
        Size::new(
            size.width.saturating_sub(2 * TRACK_INSET_X as u32),
            size.height.saturating_sub(2 * TRACK_INSET_Y as u32),
        ),
    )
}

/// Y coordinate of a value within the track (value grows upward).
#[inline]
fn value_y(track: Rectangle, range: Range, value: f32) -> i32 {
    let t = range.normalize(value);
    let bottom = track.top_left.y + track.size.height as i32;
    bottom - (t * track.size.height as f32) as i32
}

/// The filled region for a display value: the span of the track between
/// the zero line and the value, clamped into the track.
pub(crate) fn fill_extent(track: Rectangle, range: Range, display: f32) -> Rectangle {
    let zero_y = value_y(track, range, 0.0);
    let val_y = value_y(track, range, display);
    let (top, bottom) = if val_y <= zero_y { (val_y, zero_y) } else { (zero_y, val_y) };
    Rectangle::new(
        Point::new(track.top_left.x, top),
        Size::new(track.size.width, (bottom - top) as u32),
    )
}

/// Power bar painter.
#[derive(Default)]
pub struct BarPainter;

impl InstrumentPainter for BarPainter {
    fn draw_static(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions) {
        let size = layer.size();
        let track = track(size);
        let range = Range::new(options.min, options.max);

        Rectangle::new(track.top_left - Point::new(1, 1), track.size + Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
            .draw(layer)
            .ok();

        // zero line, extended past the track edges
        let zero_y = value_y(track, range, 0.0);
        let right = track.top_left.x + track.size.width as i32;
        Line::new(Point::new(track.top_left.x - 5, zero_y), Point::new(right + 5, zero_y))
            .into_styled(PrimitiveStyle::with_stroke(WHITE, 1))
            .draw(layer)
            .ok();

        // bound labels next to the track ends
        let mut buf: String<8> = String::new();
        write!(buf, "{:.0}", options.max).ok();
        Text::with_text_style(
            &buf,
            Point::new(right + 8, track.top_left.y + 4),
            LABEL_STYLE_GRAY,
            LEFT_ALIGNED,
        )
        .draw(layer)
        .ok();
        buf.clear();
        write!(buf, "{:.0}", options.min).ok();
        Text::with_text_style(
            &buf,
            Point::new(right + 8, track.top_left.y + track.size.height as i32),
            LABEL_STYLE_GRAY,
            LEFT_ALIGNED,
        )
        .draw(layer)
        .ok();

        let center_x = size.width as i32 / 2;
        Text::with_text_style(
            &options.label,
            Point::new(center_x, 10),
            LABEL_STYLE_WHITE,
            CENTERED,
        )
        .draw(layer)
        .ok();
        Text::with_text_style(
            &options.unit,
            Point::new(center_x, size.height as i32 - 4),
            LABEL_STYLE_ORANGE,
            CENTERED,
        )
        .draw(layer)
        .ok();
    }

    fn draw_dynamic(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions, display: f32) {
        let size = layer.size();
        let track = track(size);
        let range = Range::new(options.min, options.max);

        let fill = fill_extent(track, range, display);
        let color = if display >= 0.0 { GREEN } else { BLUE };
        fill.into_styled(PrimitiveStyle::with_fill(color)).draw(layer).ok();

        let text = super::format_whole(display);
        Text::with_text_style(
            &text,
            Point::new(TRACK_INSET_X / 2, size.height as i32 / 2),
            VALUE_STYLE_MEDIUM_WHITE,
            CENTERED,
        )
        .draw(layer)
        .ok();
    }
}
