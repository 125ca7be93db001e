//! E-paper panel driver for the weather display.
//!
//! [`Ssd1680Sink`] drives a Waveshare 2.13" V4 (SSD1680) panel over
//! `embedded-hal` 1.0 traits and implements
//! [`FrameSink`](weather_common::sink::FrameSink), so the layout engine can
//! publish frames to it directly. The caller supplies the SPI device, the
//! control pins and a delay source for its platform.

#![allow(clippy::cast_possible_truncation)]

pub mod ssd1680;

pub use ssd1680::Ssd1680Sink;
