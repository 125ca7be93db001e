use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::IconBox;
use super::cloud::CloudShape;
use super::precipitation::draw_drops;
use crate::colors::INK;
use crate::primitives::draw_polyline;

/// Zig-zag lightning bolt from the cloud base to the bottom of the box.
fn draw_bolt<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let bolt = [
        frame.point(0.56, 0.55),
        frame.point(0.42, 0.78),
        frame.point(0.58, 0.78),
        frame.point(0.44, 0.98),
    ];
    draw_polyline(display, &bolt, INK, frame.line_stroke());
}

/// Heavy storm cloud, filled solid, with a bolt.
pub(super) fn draw_storm<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    CloudShape::within(frame, 0.0, 0.05, 1.0, 0.55).fill(display);
    draw_bolt(display, frame);
}

/// Outlined cloud with a bolt and rain either side of it.
pub(super) fn draw_thunderstorm<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    CloudShape::within(frame, 0.0, 0.05, 1.0, 0.55).outline(display, frame.outline_stroke());
    draw_bolt(display, frame);
    draw_drops(display, frame, &[0.22, 0.88], 0.72, 0.92);
}
