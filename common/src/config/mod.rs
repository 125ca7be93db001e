//! Display configuration.
//!
//! - `layout`: Panel dimensions and pre-computed layout constants
//! - [`DisplayConfig`]: Runtime choices (panel geometry, mounting, sink)
//!
//! Runtime values come from a key lookup so the same parsing serves the
//! process environment and tests:
//!
//! | Key | Values | Default |
//! |-----|--------|---------|
//! | `WEATHER_PANEL_SINK` | `hardware`, `null` | `hardware` |
//! | `WEATHER_PANEL_MOUNTING` | `upright`, `inverted` | `inverted` |

pub mod layout;

use core::str::FromStr;

use embedded_graphics::geometry::Size;
pub use layout::{
    CANVAS_HEIGHT,
    CANVAS_WIDTH,
    CURRENT_ICON_SIZE,
    CURRENT_ICON_X,
    CURRENT_ICON_Y,
    DETAIL_LINE_HEIGHT,
    DETAIL_X,
    DETAIL_Y,
    DIVIDER_Y,
    FORECAST_COLUMNS,
    FORECAST_DAY_Y,
    FORECAST_ICON_SIZE,
    FORECAST_ICON_Y,
    FORECAST_TEMP_Y,
    HEADER_Y,
    PANEL_HEIGHT,
    PANEL_WIDTH,
    TEMP_F_Y,
    TEMP_X,
    TEMP_Y,
};
use thiserror::Error;

/// Environment key selecting the frame sink.
pub const SINK_KEY: &str = "WEATHER_PANEL_SINK";

/// Environment key selecting the mounting orientation.
pub const MOUNTING_KEY: &str = "WEATHER_PANEL_MOUNTING";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown value `{value}` for {key}")]
    UnknownValue { key: &'static str, value: String },
}

// =============================================================================
// Panel Geometry
// =============================================================================

/// Physical pixel dimensions of the panel, in its native (portrait) orientation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelGeometry {
    pub width: u32,
    pub height: u32,
}

impl PanelGeometry {
    /// Waveshare 2.13" V4 (SSD1680), 122x250.
    pub const EPD_2IN13_V4: Self = Self {
        width: PANEL_WIDTH,
        height: PANEL_HEIGHT,
    };

    /// Size of the logical landscape canvas: width and height swapped.
    pub const fn landscape(self) -> Size { Size::new(self.height, self.width) }

    /// Bytes per packed panel row.
    pub const fn stride(self) -> usize { self.width.div_ceil(8) as usize }

    /// Bytes in one packed panel frame.
    pub const fn frame_len(self) -> usize { self.stride() * self.height as usize }
}

impl Default for PanelGeometry {
    fn default() -> Self { Self::EPD_2IN13_V4 }
}

// =============================================================================
// Mounting and Sink Selection
// =============================================================================

/// How the panel is physically mounted.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Mounting {
    /// Frame is sent as drawn.
    Upright,
    /// Panel is mounted upside down; the frame is rotated 180 degrees.
    #[default]
    Inverted,
}

impl Mounting {
    pub const fn needs_rotation(self) -> bool { matches!(self, Self::Inverted) }
}

impl FromStr for Mounting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upright" => Ok(Self::Upright),
            "inverted" => Ok(Self::Inverted),
            _ => Err(ConfigError::UnknownValue {
                key: MOUNTING_KEY,
                value: s.to_owned(),
            }),
        }
    }
}

/// Which frame sink receives finished frames.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SinkKind {
    /// The physical panel (or whatever the binary wires up as its stand-in).
    #[default]
    Hardware,
    /// Discard frames. Used for tests and dry runs.
    Null,
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardware" => Ok(Self::Hardware),
            "null" | "none" => Ok(Self::Null),
            _ => Err(ConfigError::UnknownValue {
                key: SINK_KEY,
                value: s.to_owned(),
            }),
        }
    }
}

// =============================================================================
// Display Configuration
// =============================================================================

/// Runtime display configuration.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct DisplayConfig {
    pub panel: PanelGeometry,
    pub mounting: Mounting,
    pub sink: SinkKind,
}

impl DisplayConfig {
    /// Build a configuration from a key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(SINK_KEY) {
            config.sink = value.parse()?;
        }
        if let Some(value) = lookup(MOUNTING_KEY) {
            config.mounting = value.parse()?;
        }
        Ok(config)
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }
}
