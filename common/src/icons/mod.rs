//! Weather pictograms.
//!
//! Every pictogram is drawn into a square box `[x, x+size] x [y, y+size]`.
//! Drawing goes through a clipped view of the target, so no ink lands outside
//! the box even when strokes or degenerate sizes would overshoot it.
//!
//! Layered pictograms (sun behind cloud, broken clouds, showers) are drawn in
//! three passes: the shape at the back, a paper fill of the front shape's
//! silhouette, then the front shape's outline. Swapping the passes leaves the
//! back shape showing through the front one.
//!
//! Shapes are described as fractions of the box size, so one drawer serves
//! both the large current-conditions icon and the small forecast icons.

mod cloud;
mod fog;
mod precipitation;
mod storm;
mod sun;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Pictogram names, one per drawable weather condition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Pictogram {
    Sun,
    Cloud,
    Rain,
    Snow,
    Storm,
    Fog,
    SunCloud,
    BrokenClouds,
    ShowerRain,
    Thunderstorm,
}

impl Pictogram {
    pub const ALL: [Self; 10] = [
        Self::Sun,
        Self::Cloud,
        Self::Rain,
        Self::Snow,
        Self::Storm,
        Self::Fog,
        Self::SunCloud,
        Self::BrokenClouds,
        Self::ShowerRain,
        Self::Thunderstorm,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Cloud => "cloud",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
            Self::Fog => "fog",
            Self::SunCloud => "sun-cloud",
            Self::BrokenClouds => "broken-clouds",
            Self::ShowerRain => "shower-rain",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

/// Draw `pictogram` into the box at `origin` with edge length `size`.
pub fn draw_pictogram<D>(
    display: &mut D,
    pictogram: Pictogram,
    origin: Point,
    size: u32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let frame = IconBox::new(origin, size);
    let mut clipped = display.clipped(&frame.bounds());
    let target = &mut clipped;

    match pictogram {
        Pictogram::Sun => sun::draw_sun(target, frame),
        Pictogram::Cloud => cloud::draw_cloud(target, frame),
        Pictogram::SunCloud => cloud::draw_sun_cloud(target, frame),
        Pictogram::BrokenClouds => cloud::draw_broken_clouds(target, frame),
        Pictogram::Rain => precipitation::draw_rain(target, frame),
        Pictogram::ShowerRain => precipitation::draw_shower_rain(target, frame),
        Pictogram::Snow => precipitation::draw_snow(target, frame),
        Pictogram::Storm => storm::draw_storm(target, frame),
        Pictogram::Thunderstorm => storm::draw_thunderstorm(target, frame),
        Pictogram::Fog => fog::draw_fog(target, frame),
    }
}

// =============================================================================
// Icon Box
// =============================================================================

/// The square an icon is drawn into, with helpers for fractional positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct IconBox {
    pub origin: Point,
    pub size: u32,
}

impl IconBox {
    pub(crate) const fn new(
        origin: Point,
        size: u32,
    ) -> Self {
        Self { origin, size }
    }

    /// Inclusive box: `size + 1` pixels along each edge.
    pub(crate) const fn bounds(self) -> Rectangle { Rectangle::new(self.origin, Size::new(self.size + 1, self.size + 1)) }

    #[inline]
    pub(crate) fn len(
        self,
        fraction: f32,
    ) -> f32 {
        fraction * self.size as f32
    }

    #[inline]
    pub(crate) fn x(
        self,
        fraction: f32,
    ) -> f32 {
        self.origin.x as f32 + self.len(fraction)
    }

    #[inline]
    pub(crate) fn y(
        self,
        fraction: f32,
    ) -> f32 {
        self.origin.y as f32 + self.len(fraction)
    }

    pub(crate) fn point(
        self,
        fx: f32,
        fy: f32,
    ) -> Point {
        Point::new(self.x(fx).round() as i32, self.y(fy).round() as i32)
    }

    /// Stroke for rays, drops, bolts and fog bands.
    pub(crate) const fn line_stroke(self) -> u32 { if self.size >= 24 { 2 } else { 1 } }

    /// Stroke for cloud outlines.
    pub(crate) const fn outline_stroke(self) -> u32 {
        let width = self.size / 24;
        if width == 0 { 1 } else { width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::colors::{INK, PAPER};

    const SIZES: [u32; 5] = [16, 25, 50, 80, 90];

    fn draw_alone(
        pictogram: Pictogram,
        origin: Point,
        size: u32,
    ) -> Canvas {
        let mut canvas = Canvas::new(200, 200);
        draw_pictogram(&mut canvas, pictogram, origin, size);
        canvas
    }

    #[test]
    fn test_ink_stays_inside_box() {
        let origin = Point::new(37, 41);
        for pictogram in Pictogram::ALL {
            for size in SIZES {
                let canvas = draw_alone(pictogram, origin, size);
                let bounds = canvas
                    .region_ink_bounds(&canvas.bounding_box())
                    .unwrap_or_else(|| panic!("{} at {size} drew nothing", pictogram.name()));
                let allowed = IconBox::new(origin, size).bounds();
                assert!(
                    allowed.contains(bounds.top_left) && allowed.contains(bounds.bottom_right().unwrap()),
                    "{} at {size}: ink {bounds:?} outside {allowed:?}",
                    pictogram.name()
                );
            }
        }
    }

    #[test]
    fn test_pictograms_are_distinct() {
        let origin = Point::new(10, 10);
        let renders: Vec<Canvas> = Pictogram::ALL.iter().map(|&p| draw_alone(p, origin, 50)).collect();
        for (i, a) in renders.iter().enumerate() {
            for b in &renders[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_drawing_at_canvas_edge_is_clipped() {
        for pictogram in Pictogram::ALL {
            let mut canvas = Canvas::new(40, 40);
            draw_pictogram(&mut canvas, pictogram, Point::new(20, -15), 50);
            draw_pictogram(&mut canvas, pictogram, Point::new(-30, 25), 50);
            assert!(canvas.ink_count() <= 1600);
        }
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        for pictogram in Pictogram::ALL {
            for size in [0, 1, 3, 8] {
                let canvas = draw_alone(pictogram, Point::new(5, 5), size);
                if let Some(bounds) = canvas.region_ink_bounds(&canvas.bounding_box()) {
                    assert!(IconBox::new(Point::new(5, 5), size).bounds().contains(bounds.top_left));
                }
            }
        }
    }

    #[test]
    fn test_sun_cloud_erases_sun_behind_cloud() {
        let frame = IconBox::new(Point::new(20, 20), 50);
        let (sun, cloud) = cloud::sun_cloud_parts(frame);
        let interior: Vec<Point> = cloud
            .area(0)
            .points()
            .filter(|&p| cloud.covers(p, frame.outline_stroke() as f32 + 1.0))
            .collect();
        assert!(!interior.is_empty());

        let mut sun_only = Canvas::new(100, 100);
        sun.draw(&mut sun_only, frame.line_stroke());
        assert!(interior.iter().any(|&p| sun_only.pixel(p) == Some(INK)));

        let composed = draw_alone(Pictogram::SunCloud, frame.origin, frame.size);
        assert!(interior.iter().all(|&p| composed.pixel(p) == Some(PAPER)));
    }

    #[test]
    fn test_broken_clouds_front_hides_back() {
        let frame = IconBox::new(Point::new(20, 20), 80);
        let (back, front) = cloud::broken_cloud_parts(frame);
        let interior: Vec<Point> = front
            .area(0)
            .points()
            .filter(|&p| front.covers(p, frame.outline_stroke() as f32 + 1.0))
            .collect();
        assert!(interior.iter().any(|&p| back.covers(p, 0.0)));

        let composed = draw_alone(Pictogram::BrokenClouds, frame.origin, frame.size);
        assert!(interior.iter().all(|&p| composed.pixel(p) == Some(PAPER)));
    }

    #[test]
    fn test_outline_stroke_grows_with_size() {
        let stroke = |size| IconBox::new(Point::zero(), size).outline_stroke();
        assert_eq!(stroke(16), 1);
        assert_eq!(stroke(22), 1);
        assert_eq!(stroke(50), 2);
        assert_eq!(stroke(90), 3);
    }
}
