use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::IconBox;
use crate::colors::INK;
use crate::primitives::draw_line;

/// Three horizontal bands; the middle one is inset to read as drifting mist.
pub(super) fn draw_fog<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    for (band, (start, end)) in [(0.0, 1.0), (0.15, 0.85), (0.0, 1.0)].into_iter().enumerate() {
        let y = 1.0 / 3.0 + band as f32 / 4.0;
        draw_line(display, frame.point(start, y), frame.point(end, y), INK, frame.line_stroke());
    }
}
