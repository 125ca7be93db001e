//! Cloud silhouette and the pictograms layered on it.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::IconBox;
use super::sun::SunShape;
use crate::colors::{INK, PAPER};

/// Three overlapping lobes on a flat base, fitted to a `width x height` box.
///
/// The shape is evaluated per pixel, so the same silhouette can be filled,
/// erased with a halo or stroked as an outline.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct CloudShape {
    /// (center x, center y, radius) for the left, top and right lobes.
    lobes: [(f32, f32, f32); 3],
    base_left: f32,
    base_right: f32,
    base_top: f32,
    base_bottom: f32,
    corners: (Point, Point),
}

impl CloudShape {
    pub(crate) fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        let left = 0.30 * height;
        let top = 0.45 * height;
        let right = 0.35 * height;
        Self {
            lobes: [
                (x + left, y + height - left, left),
                (x + 0.45 * width, y + top, top),
                (x + width - right, y + height - right, right),
            ],
            base_left: x + left,
            base_right: x + width - right,
            base_top: y + 0.5 * height,
            base_bottom: y + height,
            corners: (
                Point::new(x.floor() as i32, y.floor() as i32),
                Point::new((x + width).ceil() as i32, (y + height).ceil() as i32),
            ),
        }
    }

    /// Cloud fitted to a box given as fractions of `frame`.
    pub(crate) fn within(
        frame: IconBox,
        fx: f32,
        fy: f32,
        fw: f32,
        fh: f32,
    ) -> Self {
        Self::new(frame.x(fx), frame.y(fy), frame.len(fw), frame.len(fh))
    }

    /// Bounding rectangle grown by `margin` pixels on every side.
    pub(crate) fn area(
        &self,
        margin: i32,
    ) -> Rectangle {
        let (min, max) = self.corners;
        Rectangle::with_corners(min - Point::new(margin, margin), max + Point::new(margin, margin))
    }

    /// Whether the pixel at `point` lies inside the silhouette shrunk by
    /// `inset` pixels. A negative inset grows it.
    pub(crate) fn covers(
        &self,
        point: Point,
        inset: f32,
    ) -> bool {
        let px = point.x as f32 + 0.5;
        let py = point.y as f32 + 0.5;

        let in_lobe = self.lobes.iter().any(|&(cx, cy, radius)| {
            let r = radius - inset;
            r > 0.0 && (px - cx).powi(2) + (py - cy).powi(2) <= r * r
        });
        in_lobe
            || (px >= self.base_left
                && px <= self.base_right
                && py >= self.base_top + inset
                && py <= self.base_bottom - inset)
    }

    fn paint<D, F>(
        &self,
        display: &mut D,
        margin: i32,
        color: BinaryColor,
        predicate: F,
    ) where
        D: DrawTarget<Color = BinaryColor>,
        F: Fn(Point) -> bool,
    {
        let pixels = self
            .area(margin)
            .points()
            .filter(|&p| predicate(p))
            .map(|p| Pixel(p, color));
        display.draw_iter(pixels).ok();
    }

    pub(crate) fn fill<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.paint(display, 1, INK, |p| self.covers(p, 0.0));
    }

    /// Paper over the silhouette plus a `halo` pixel gap around it.
    pub(crate) fn erase<D>(
        &self,
        display: &mut D,
        halo: u32,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let halo = halo as i32;
        self.paint(display, halo + 1, PAPER, |p| self.covers(p, -(halo as f32)));
    }

    pub(crate) fn outline<D>(
        &self,
        display: &mut D,
        stroke_width: u32,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let inner = stroke_width as f32;
        self.paint(display, 1, INK, |p| self.covers(p, 0.0) && !self.covers(p, inner));
    }

    /// Paper fill then outline: the front half of the layering protocol.
    pub(crate) fn overlay<D>(
        &self,
        display: &mut D,
        frame: IconBox,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let stroke = frame.outline_stroke();
        self.erase(display, stroke);
        self.outline(display, stroke);
    }
}

pub(super) fn draw_cloud<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    CloudShape::within(frame, 0.0, 0.2, 1.0, 0.6).outline(display, frame.outline_stroke());
}

pub(crate) fn sun_cloud_parts(frame: IconBox) -> (SunShape, CloudShape) {
    (
        SunShape::new(frame.x(0.62), frame.y(0.36), frame.len(0.34)),
        CloudShape::within(frame, 0.0, 0.4, 0.85, 0.55),
    )
}

pub(super) fn draw_sun_cloud<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let (sun, cloud) = sun_cloud_parts(frame);
    sun.draw(display, frame.line_stroke());
    cloud.overlay(display, frame);
}

pub(crate) fn broken_cloud_parts(frame: IconBox) -> (CloudShape, CloudShape) {
    (
        CloudShape::within(frame, 0.3, 0.12, 0.7, 0.45),
        CloudShape::within(frame, 0.0, 0.38, 0.8, 0.52),
    )
}

pub(super) fn draw_broken_clouds<D>(
    display: &mut D,
    frame: IconBox,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let (back, front) = broken_cloud_parts(frame);
    back.fill(display);
    front.overlay(display, frame);
}
