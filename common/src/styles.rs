//! Fonts and text styles.
//!
//! Labels use the ISO 8859-1 variants of the built-in mono fonts so location
//! names with Latin-1 characters (`München`, `Ålesund`) render instead of
//! falling back to the replacement glyph. The large temperature uses ProFont.
//!
//! All text is positioned by its top-left corner, which keeps centering
//! arithmetic a plain subtraction of measured widths.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_7X13, FONT_7X13_BOLD};
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_24_POINT;

/// Top-left anchored text. Every text element in the layout uses this.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Location header.
pub const HEADER_FONT: &MonoFont = &FONT_7X13_BOLD;

/// Large Celsius reading (`ProFont` 24pt).
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Fahrenheit line under the main reading.
pub const SECONDARY_FONT: &MonoFont = &FONT_7X13;

/// Detail block and forecast labels (6x10 pixels).
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Role of a text element in the layout. Resolved to a font when painting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontRole {
    Header,
    Value,
    Secondary,
    Label,
}

impl FontRole {
    pub const fn font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Header => HEADER_FONT,
            Self::Value => VALUE_FONT,
            Self::Secondary => SECONDARY_FONT,
            Self::Label => LABEL_FONT,
        }
    }
}
