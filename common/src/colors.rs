//! Pixel values for the monochrome panel.
//!
//! The canvas is a [`BinaryColor`] surface. `On` is ink (black on the panel),
//! `Off` is paper (white). Keeping the mapping in one place means drawing code
//! never has to remember which of the two is "set".

use embedded_graphics::pixelcolor::BinaryColor;

/// Ink (black). Everything the icons and text put on the panel.
pub const INK: BinaryColor = BinaryColor::On;

/// Paper (white). Background, and the erase pass of composed pictograms.
pub const PAPER: BinaryColor = BinaryColor::Off;
