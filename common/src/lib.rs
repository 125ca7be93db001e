//! Icon composition and layout engine for a 1-bit e-paper weather panel.
//!
//! This crate is platform-agnostic and shared between the panel driver and
//! the desktop preview:
//!
//! - [`canvas`]: 1-bit drawing surface and panel frame packing
//! - [`icons`]: Weather pictograms drawn into a square box
//! - [`classify`]: WMO weather code to pictogram mapping
//! - [`model`]: Validated current conditions and daily forecast
//! - [`layout`]: Frame plan, painting, rotation and publishing
//! - [`sink`]: Frame sink capability and the null sink
//! - [`config`]: Layout constants and runtime display configuration
//! - [`styles`]: Fonts and text styles
//! - [`units`]: Temperature conversion and compass rounding
//!
//! # Rendering
//!
//! ```text
//! PresentationModel -> plan -> paint -> rotate -> PanelFrame -> FrameSink
//! ```
//!
//! Rendering is infallible. Missing data skips the element that needs it and
//! unknown weather codes draw a cloud.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod canvas;
pub mod classify;
pub mod colors;
pub mod config;
pub mod icons;
pub mod layout;
pub mod model;
pub mod primitives;
pub mod sink;
pub mod styles;
pub mod units;

// Re-export commonly used items
pub use canvas::{Canvas, PanelFrame};
pub use classify::{Daylight, WeatherCode, classify};
pub use config::DisplayConfig;
pub use icons::{Pictogram, draw_pictogram};
pub use layout::{clear_panel, publish, render};
pub use model::{DailyForecastEntry, Observation, PresentationModel, Wind};
pub use sink::{AnySink, FrameSink, NullSink, SinkError};
