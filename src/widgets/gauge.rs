//! Sweep gauge painter (speedometer).
//!
//! Static layer: dial rim arc, major tick marks with numbers, redline
//! band over the top of the range, label and unit text. Dynamic layer:
//! needle at the display value's angle plus the numeric value in the dial
//! center.
//!
//! Angles use the screen convention from [`crate::angle`]: degrees
//! clockwise from 3 o'clock, so a needle at -90 points straight up.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle},
    text::Text,
};
use heapless::String;

use crate::{
    angle::value_to_angle,
    colors::{GRAY, RED, WHITE},
    config::InstrumentOptions,
    instrument::InstrumentPainter,
    smoothing::Range,
    styles::{
        CENTERED, LABEL_STYLE_GRAY, LABEL_STYLE_ORANGE, TITLE_STYLE_WHITE,
        VALUE_STYLE_MEDIUM_WHITE,
    },
    surface::FrameLayer,
};

/// Inset from the layer edge to the dial rim, in pixels.
const RIM_MARGIN: u32 = 6;

/// Tick marks extend this far inward from the rim.
const TICK_LEN: i32 = 8;

/// Tick numbers sit this far inside the tick marks.
const NUMBER_INSET: i32 = 14;

/// The needle stops short of the rim by this much.
const NEEDLE_GAP: i32 = 16;

/// Fraction of the range covered by the redline band, from the top end.
const REDLINE_FRACTION: f32 = 0.15;

/// Point on the dial at `deg` degrees and `radius` pixels from `center`.
#[inline]
pub(crate) fn dial_point(center: Point, radius: i32, deg: f32) -> Point {
    let (sin, cos) = deg.to_radians().sin_cos();
    Point::new(
        center.x + (radius as f32 * cos) as i32,
        center.y + (radius as f32 * sin) as i32,
    )
}

/// Speed gauge painter.
pub struct GaugePainter {
    /// Number of major tick intervals around the sweep.
    pub major_ticks: u32,
}

impl Default for GaugePainter {
    fn default() -> Self {
        Self { major_ticks: 13 }
    }
}

impl GaugePainter {
    fn geometry(layer: &FrameLayer) -> (Point, i32) {
        let size = layer.size();
        let center = Point::new(size.width as i32 / 2, size.height as i32 / 2);
        let radius = (size.width.min(size.height) / 2 - RIM_MARGIN) as i32;
        (center, radius)
    }

    fn draw_arc(
        layer: &mut FrameLayer,
        center: Point,
        radius: i32,
        from_deg: f32,
        to_deg: f32,
        style: PrimitiveStyle<Rgb565>,
    ) {
        // embedded-graphics arcs sweep counterclockwise for positive
        // angles, opposite to this crate's convention, hence the negation
        let diameter = (radius * 2) as u32;
        let top_left = Point::new(center.x - radius, center.y - radius);
        Arc::new(top_left, diameter, Angle::from_degrees(-from_deg), Angle::from_degrees(-(to_deg - from_deg)))
            .into_styled(style)
            .draw(layer)
            .ok();
    }
}

impl InstrumentPainter for GaugePainter {
    fn draw_static(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions) {
        let (center, radius) = Self::geometry(layer);
        let range = Range::new(options.min, options.max);
        let redline_start = options.max - range.span() * REDLINE_FRACTION;

        // dial rim, with the redline band over its top section
        let redline_deg = value_to_angle(redline_start, range, options.start_deg, options.end_deg);
        Self::draw_arc(
            layer,
            center,
            radius,
            options.start_deg,
            redline_deg,
            PrimitiveStyle::with_stroke(GRAY, 2),
        );
        Self::draw_arc(
            layer,
            center,
            radius,
            redline_deg,
            options.end_deg,
            PrimitiveStyle::with_stroke(RED, 3),
        );

        // major ticks with numbers
        let tick_style = PrimitiveStyle::with_stroke(GRAY, 1);
        for i in 0..=self.major_ticks {
            let t = i as f32 / self.major_ticks as f32;
            let value = options.min + range.span() * t;
            let deg = value_to_angle(value, range, options.start_deg, options.end_deg);

            let outer = dial_point(center, radius, deg);
            let inner = dial_point(center, radius - TICK_LEN, deg);
            Line::new(outer, inner).into_styled(tick_style).draw(layer).ok();

            // number every other tick to keep the dial readable
            if i % 2 == 0 {
                let mut buf: String<8> = String::new();
                write!(buf, "{value:.0}").ok();
                let at = dial_point(center, radius - TICK_LEN - NUMBER_INSET, deg);
                Text::with_text_style(&buf, at, LABEL_STYLE_GRAY, CENTERED)
                    .draw(layer)
                    .ok();
            }
        }

        // label inside the dial, unit below the center
        Text::with_text_style(
            &options.label,
            Point::new(center.x, center.y + radius / 2),
            TITLE_STYLE_WHITE,
            CENTERED,
        )
        .draw(layer)
        .ok();
        Text::with_text_style(
            &options.unit,
            Point::new(center.x, center.y + 24),
            LABEL_STYLE_ORANGE,
            CENTERED,
        )
        .draw(layer)
        .ok();
    }

    fn draw_dynamic(&mut self, layer: &mut FrameLayer, options: &InstrumentOptions, display: f32) {
        let (center, radius) = Self::geometry(layer);
        let range = Range::new(options.min, options.max);
        let deg = value_to_angle(display, range, options.start_deg, options.end_deg);

        let tip = dial_point(center, radius - NEEDLE_GAP, deg);
        Line::new(center, tip)
            .into_styled(PrimitiveStyle::with_stroke(WHITE, 3))
            .draw(layer)
            .ok();
        Circle::with_center(center, 9)
            .into_styled(PrimitiveStyle::with_fill(WHITE))
            .draw(layer)
            .ok();

        let text = super::format_whole(display);
        Text::with_text_style(
            &text,
            Point::new(center.x, center.y - 16),
            VALUE_STYLE_MEDIUM_WHITE,
            CENTERED,
        )
        .draw(layer)
        .ok();
    }
}
