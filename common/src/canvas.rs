//! One-bit drawing surface and panel frame packing.
//!
//! [`Canvas`] stores pixels in the panel's wire format: row-major, one bit per
//! pixel, most significant bit first, each row padded to a whole byte. A set
//! bit is paper and a cleared bit is ink, so a freshly allocated canvas is all
//! `0xFF`. Padding bits are never written and stay paper.
//!
//! Drawing goes through the `embedded-graphics` [`DrawTarget`] impl, which
//! silently drops pixels outside the canvas. The convenience methods
//! ([`Canvas::line`], [`Canvas::ellipse`], ...) wrap the shared primitives.

use core::convert::Infallible;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::renderer::TextRenderer;
use thiserror::Error;

use crate::colors::{INK, PAPER};
use crate::config::PanelGeometry;
use crate::primitives::{draw_line, draw_polyline, draw_text, fill_ellipse, fill_rectangle};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("canvas {canvas_width}x{canvas_height} does not match panel {panel_width}x{panel_height}")]
    SizeMismatch {
        canvas_width: u32,
        canvas_height: u32,
        panel_width: u32,
        panel_height: u32,
    },
}

// =============================================================================
// Text Measurement
// =============================================================================

/// Pixel extent of a rendered string.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct GlyphExtent {
    pub width: u32,
    pub height: u32,
}

/// Measure `text` as it would be drawn in `font`. Pure; draws nothing.
pub fn measure_text(
    text: &str,
    font: &MonoFont<'_>,
) -> GlyphExtent {
    let style = MonoTextStyle::new(font, INK);
    let size = style.measure_string(text, Point::zero(), Baseline::Top).bounding_box.size;
    GlyphExtent {
        width: size.width,
        height: size.height,
    }
}

#[inline]
const fn row_stride(width: u32) -> usize { width.div_ceil(8) as usize }

// =============================================================================
// Canvas
// =============================================================================

/// A monochrome pixel surface owned by one render pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    stride: usize,
    buffer: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with paper.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        let stride = row_stride(width);
        Self {
            width,
            height,
            stride,
            buffer: vec![0xFF; stride * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.height }

    /// Packed pixel data (0 = ink, 1 = paper).
    pub fn as_bytes(&self) -> &[u8] { &self.buffer }

    #[inline]
    fn in_bounds(
        &self,
        point: Point,
    ) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as u32) < self.width && (point.y as u32) < self.height
    }

    #[inline]
    fn bit(
        &self,
        x: u32,
        y: u32,
    ) -> (usize, u8) {
        (y as usize * self.stride + (x / 8) as usize, 0x80 >> (x % 8))
    }

    #[inline]
    fn is_ink(
        &self,
        x: u32,
        y: u32,
    ) -> bool {
        let (index, mask) = self.bit(x, y);
        self.buffer[index] & mask == 0
    }

    /// Pixel value at `point`, or `None` outside the canvas.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<BinaryColor> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(if self.is_ink(point.x as u32, point.y as u32) { INK } else { PAPER })
    }

    /// Set one pixel. Out-of-bounds points are ignored.
    pub fn set_pixel(
        &mut self,
        point: Point,
        color: BinaryColor,
    ) {
        if !self.in_bounds(point) {
            return;
        }
        let (index, mask) = self.bit(point.x as u32, point.y as u32);
        if color.is_on() {
            self.buffer[index] &= !mask;
        } else {
            self.buffer[index] |= mask;
        }
    }

    /// Number of ink pixels on the whole canvas.
    pub fn ink_count(&self) -> usize { self.ink_count_in(&self.bounding_box()) }

    /// Number of ink pixels inside `region` (clipped to the canvas).
    pub fn ink_count_in(
        &self,
        region: &Rectangle,
    ) -> usize {
        self.ink_points_in(region).count()
    }

    /// Smallest rectangle containing every ink pixel inside `region`.
    pub fn region_ink_bounds(
        &self,
        region: &Rectangle,
    ) -> Option<Rectangle> {
        let mut points = self.ink_points_in(region);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rectangle::with_corners(min, max))
    }

    fn ink_points_in(
        &self,
        region: &Rectangle,
    ) -> impl Iterator<Item = Point> + '_ {
        region
            .intersection(&self.bounding_box())
            .points()
            .filter(|p| self.is_ink(p.x as u32, p.y as u32))
    }

    // =========================================================================
    // Drawing Operations
    // =========================================================================

    pub fn line(
        &mut self,
        start: Point,
        end: Point,
        color: BinaryColor,
        stroke_width: u32,
    ) {
        draw_line(self, start, end, color, stroke_width);
    }

    /// Fill the ellipse inscribed in the box at `top_left` with `size`.
    pub fn ellipse(
        &mut self,
        top_left: Point,
        size: Size,
        color: BinaryColor,
    ) {
        fill_ellipse(self, Rectangle::new(top_left, size), color);
    }

    pub fn filled_rectangle(
        &mut self,
        top_left: Point,
        size: Size,
        color: BinaryColor,
    ) {
        fill_rectangle(self, Rectangle::new(top_left, size), color);
    }

    pub fn polyline(
        &mut self,
        points: &[Point],
        color: BinaryColor,
        stroke_width: u32,
    ) {
        draw_polyline(self, points, color, stroke_width);
    }

    /// Draw `text` with its top-left corner at `top_left`.
    pub fn text(
        &mut self,
        text: &str,
        top_left: Point,
        font: &MonoFont<'_>,
        color: BinaryColor,
    ) {
        draw_text(self, text, top_left, font, color);
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Return a copy turned by 180 degrees: (x, y) moves to (w-1-x, h-1-y).
    pub fn rotate_180(&self) -> Self {
        let mut rotated = Self::new(self.width, self.height);
        let (w, h) = (self.width as i32, self.height as i32);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_ink(x, y) {
                    rotated.set_pixel(Point::new(w - 1 - x as i32, h - 1 - y as i32), INK);
                }
            }
        }
        rotated
    }

    /// Pack the canvas for a panel with the given physical geometry.
    ///
    /// A canvas with the panel's own dimensions is copied. A landscape canvas
    /// (dimensions swapped) is turned 90 degrees counter-clockwise, so
    /// (x, y) lands at (y, w-1-x) in the portrait frame.
    pub fn to_panel_frame(
        &self,
        geometry: PanelGeometry,
    ) -> Result<PanelFrame, FrameError> {
        if self.width == geometry.width && self.height == geometry.height {
            return Ok(PanelFrame { canvas: self.clone() });
        }
        if self.width != geometry.height || self.height != geometry.width {
            return Err(FrameError::SizeMismatch {
                canvas_width: self.width,
                canvas_height: self.height,
                panel_width: geometry.width,
                panel_height: geometry.height,
            });
        }

        let mut portrait = Self::new(geometry.width, geometry.height);
        let w = self.width as i32;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_ink(x, y) {
                    portrait.set_pixel(Point::new(y as i32, w - 1 - x as i32), INK);
                }
            }
        }
        Ok(PanelFrame { canvas: portrait })
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        // Whole bytes are fine here: padding bits must read as paper, and a
        // paper clear writes exactly that
        if color.is_on() {
            for y in 0..self.height {
                for x in 0..self.width {
                    self.set_pixel(Point::new(x as i32, y as i32), INK);
                }
            }
        } else {
            self.buffer.fill(0xFF);
        }
        Ok(())
    }
}

// =============================================================================
// Panel Frame
// =============================================================================

/// A finished frame at the panel's physical dimensions, ready for a sink.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PanelFrame {
    canvas: Canvas,
}

impl PanelFrame {
    /// An all-paper frame, used to blank the panel.
    pub fn blank(geometry: PanelGeometry) -> Self {
        Self {
            canvas: Canvas::new(geometry.width, geometry.height),
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.canvas.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.canvas.height }

    /// Bytes per packed row.
    #[inline]
    pub const fn stride(&self) -> usize { self.canvas.stride }

    /// Packed bits, row-major, 0 = ink, 1 = paper.
    pub fn as_bytes(&self) -> &[u8] { self.canvas.as_bytes() }

    /// Pixel value at `point`, or `None` outside the frame.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<BinaryColor> {
        self.canvas.pixel(point)
    }

    /// Every pixel of the frame, for drawing it onto another target.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        self.canvas
            .bounding_box()
            .points()
            .map(|p| Pixel(p, if self.canvas.is_ink(p.x as u32, p.y as u32) { INK } else { PAPER }))
    }
}

// =============================================================================
// Tests
// =============================================================================
