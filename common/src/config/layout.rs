//! Panel dimensions and pre-computed layout constants.
//!
//! The layout is drawn in landscape on a canvas whose width and height are the
//! panel's height and width. All vertical positions below are in that logical
//! landscape space, before the final orientation correction.
//!
//! ```text
//!  0 +---------------------- location ----------------------+
//! 17 | [icon 50px]   20°C       10km/h N                     |
//!    |               68°F       Feels 18°C                   |
//!    |                          Upd 14:30                    |
//! 72 +-------------------------------------------------------+
//! 75 |     Mon       |      Tue      |      Wed              |
//! 86 |   [icon]      |    [icon]     |    [icon]             |
//!111 |    25/15      |     18/10     |     22/12             |
//!    +-------------------------------------------------------+
//! ```

// =============================================================================
// Panel Configuration
// =============================================================================

/// Physical panel width in pixels (Waveshare 2.13" V4, portrait).
pub const PANEL_WIDTH: u32 = 122;

/// Physical panel height in pixels.
pub const PANEL_HEIGHT: u32 = 250;

/// Logical canvas width. Landscape, so the panel's height.
pub const CANVAS_WIDTH: u32 = PANEL_HEIGHT;

/// Logical canvas height. Landscape, so the panel's width.
pub const CANVAS_HEIGHT: u32 = PANEL_WIDTH;

// =============================================================================
// Header
// =============================================================================

/// Top edge of the location label.
pub const HEADER_Y: i32 = 1;

/// Horizontal divider between current conditions and the forecast strip.
pub const DIVIDER_Y: i32 = 72;

// =============================================================================
// Current Conditions
// =============================================================================

/// Origin and size of the primary pictogram.
pub const CURRENT_ICON_X: i32 = 6;
pub const CURRENT_ICON_Y: i32 = 17;
pub const CURRENT_ICON_SIZE: u32 = 50;

/// Large Celsius reading, then the Fahrenheit line underneath.
pub const TEMP_X: i32 = 64;
pub const TEMP_Y: i32 = 18;
pub const TEMP_F_Y: i32 = 52;

/// Detail block (wind, feels like, update time), one line each.
pub const DETAIL_X: i32 = 148;
pub const DETAIL_Y: i32 = 20;
pub const DETAIL_LINE_HEIGHT: i32 = 14;

// =============================================================================
// Forecast Strip
// =============================================================================

/// The strip is always split into this many columns, whatever the entry count.
pub const FORECAST_COLUMNS: u32 = 3;

pub const FORECAST_DAY_Y: i32 = 75;
pub const FORECAST_ICON_Y: i32 = 86;
pub const FORECAST_ICON_SIZE: u32 = 22;
pub const FORECAST_TEMP_Y: i32 = 111;

// Regions must stack top to bottom without running off the canvas
const _: () = assert!(CURRENT_ICON_Y + CURRENT_ICON_SIZE as i32 <= DIVIDER_Y);
const _: () = assert!(TEMP_X > CURRENT_ICON_X + CURRENT_ICON_SIZE as i32);
const _: () = assert!(DETAIL_X > TEMP_X);
const _: () = assert!(DIVIDER_Y < FORECAST_DAY_Y);
const _: () = assert!(FORECAST_ICON_Y + FORECAST_ICON_SIZE as i32 <= FORECAST_TEMP_Y);
const _: () = assert!(FORECAST_TEMP_Y + 10 <= CANVAS_HEIGHT as i32);
