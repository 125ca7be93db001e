//! Unit conversion and compass rounding for display labels.

/// Eight compass points, clockwise from north.
pub const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Convert Celsius to Fahrenheit. The exact value is kept; truncate with
/// [`display_degrees`] only when formatting.
#[inline]
pub fn fahrenheit(celsius: f32) -> f32 { celsius * 9.0 / 5.0 + 32.0 }

/// Truncate a temperature toward zero for display.
#[inline]
pub fn display_degrees(value: f32) -> i32 { value as i32 }

/// Nearest 8-point compass label for a direction in degrees.
///
/// `index = round(direction / 45) mod 8`, so 359 wraps to "N" and negative
/// directions count counter-clockwise.
pub fn cardinal(direction_deg: f32) -> &'static str {
    let index = ((direction_deg / 45.0).round() as i64).rem_euclid(8);
    COMPASS_POINTS[index as usize]
}
