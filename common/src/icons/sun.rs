use core::f32::consts::FRAC_PI_4;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::IconBox;
use crate::colors::INK;
use crate::primitives::{draw_line, fill_ellipse};

/// A filled disc with eight rays. `radius` reaches the ray tips; the disc
/// itself is half that.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct SunShape {
    cx: f32,
    cy: f32,
    radius: f32,
}

impl SunShape {
    pub(crate) const fn new(
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Self {
        Self { cx, cy, radius }
    }

    fn at(
        &self,
        angle: f32,
        distance: f32,
    ) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(
            (self.cx + cos * distance).round() as i32,
            (self.cy + sin * distance).round() as i32,
        )
    }

    pub(crate) fn draw<D>(
        &self,
        display: &mut D,
        stroke_width: u32,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let center = Point::new(self.cx.round() as i32, self.cy.round() as i32);
        let core = self.radius.round().max(0.0) as u32;
        fill_ellipse(display, Rectangle::with_center(center, Size::new(core, core)), INK);

        // Rays start one pixel clear of the disc
        let inner = self.radius / 2.0 + self.radius / 8.0 + 1.0;
        for step in 0..8 {
            let angle = step as f32 * FRAC_PI_4;
            draw_line(display, self.at(angle, inner), self.at(angle, self.radius), INK, stroke_width);
        }
    }
}

pub(super) fn draw_sun<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let sun = SunShape::new(frame.x(0.5), frame.y(0.5), frame.len(0.5) - 1.0);
    sun.draw(display, frame.line_stroke());
}
