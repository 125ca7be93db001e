//! Low-level drawing primitives shared by the canvas, icons and layout.
//!
//! All functions are generic over `DrawTarget<Color = BinaryColor>`, so icons
//! can draw through a clipped view of the canvas as easily as onto the canvas
//! itself. Draw errors are discarded: the canvas is infallible and a clipped
//! view only ever drops pixels.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, Line, Polyline, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::styles::TOP_LEFT;

/// Draw a straight line `stroke_width` pixels thick.
pub fn draw_line<D>(
    display: &mut D,
    start: Point,
    end: Point,
    color: BinaryColor,
    stroke_width: u32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
        .draw(display)
        .ok();
}

/// Fill the ellipse inscribed in `area`.
pub fn fill_ellipse<D>(
    display: &mut D,
    area: Rectangle,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    if area.size.width == 0 || area.size.height == 0 {
        return;
    }
    Ellipse::new(area.top_left, area.size)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Fill an axis-aligned rectangle.
pub fn fill_rectangle<D>(
    display: &mut D,
    area: Rectangle,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    area.into_styled(PrimitiveStyle::with_fill(color)).draw(display).ok();
}

/// Draw connected line segments through `points`.
pub fn draw_polyline<D>(
    display: &mut D,
    points: &[Point],
    color: BinaryColor,
    stroke_width: u32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    if points.len() < 2 {
        return;
    }
    Polyline::new(points)
        .into_styled(PrimitiveStyle::with_stroke(color, stroke_width))
        .draw(display)
        .ok();
}

/// Draw text with its top-left corner at `top_left`.
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    top_left: Point,
    font: &MonoFont<'_>,
    color: BinaryColor,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    if text.is_empty() {
        return;
    }
    Text::with_text_style(text, top_left, MonoTextStyle::new(font, color), TOP_LEFT)
        .draw(display)
        .ok();
}
