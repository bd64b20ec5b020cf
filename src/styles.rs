//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` have const fn constructors in
//! embedded-graphics 0.8, so every fixed-color style the painters need is
//! computed at compile time and stored in the binary's read-only data.
//! Only styles with runtime-dependent colors are built inside draw code,
//! using the exposed font references.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{GRAY, ORANGE, WHITE};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text alignment. Used for labels, values, and tick numbers.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for the power bar min label.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for the power bar max label and readout digits.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels). For creating dynamic-color styles:
/// `MonoTextStyle::new(LABEL_FONT, color)`
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Large value font (`ProFont` 24pt). Main readout digits.
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Medium value font (`ProFont` 18pt). Gauge center value and bar value.
pub const VALUE_FONT_MEDIUM: &MonoFont = &PROFONT_18_POINT;

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// Small white text for instrument labels.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for tick numbers and scale ends.
pub const LABEL_STYLE_GRAY: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Small orange text for unit labels ("km/h", "kW", "km").
pub const LABEL_STYLE_ORANGE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, ORANGE);

/// Medium white text for in-dial titles (10x20 pixels).
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large white text for the main readout value.
pub const VALUE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Medium white text for gauge/bar values.
pub const VALUE_STYLE_MEDIUM_WHITE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&PROFONT_18_POINT, WHITE);
