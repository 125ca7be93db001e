//! Rain, showers and snow. Each hangs from an outlined cloud.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::IconBox;
use super::cloud::CloudShape;
use super::sun::SunShape;
use crate::colors::INK;
use crate::primitives::draw_line;

/// Slanted drops, one per entry of `columns`, leaning left as they fall.
pub(super) fn draw_drops<D>(
    display: &mut D,
    frame: IconBox,
    columns: &[f32],
    top: f32,
    bottom: f32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    for &column in columns {
        draw_line(
            display,
            frame.point(column, top),
            frame.point(column - 0.1, bottom),
            INK,
            frame.line_stroke(),
        );
    }
}

pub(super) fn draw_rain<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    CloudShape::within(frame, 0.0, 0.1, 1.0, 0.55).outline(display, frame.outline_stroke());
    draw_drops(display, frame, &[0.25, 0.5, 0.75], 0.72, 0.95);
}

pub(super) fn draw_shower_rain<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    SunShape::new(frame.x(0.7), frame.y(0.25), frame.len(0.24)).draw(display, frame.line_stroke());
    CloudShape::within(frame, 0.0, 0.22, 0.8, 0.45).overlay(display, frame);
    draw_drops(display, frame, &[0.2, 0.4, 0.6], 0.74, 0.95);
}

/// Snow: three six-armed flakes under the cloud.
pub(super) fn draw_snow<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    CloudShape::within(frame, 0.0, 0.1, 1.0, 0.55).outline(display, frame.outline_stroke());

    let arm = (frame.size as i32 / 12).max(2);
    let diagonal = arm * 7 / 10;
    for column in [0.25, 0.5, 0.75] {
        let center = frame.point(column, 0.83);
        for offset in [Point::new(0, arm), Point::new(diagonal, diagonal), Point::new(diagonal, -diagonal)] {
            draw_line(display, center - offset, center + offset, INK, 1);
        }
    }
}
