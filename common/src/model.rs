//! Presentation model: the display-agnostic record a frame is rendered from.
//!
//! Everything the layout needs is validated here, once. Layout code never
//! sees a non-finite temperature, an out-of-range wind direction or an
//! unsorted forecast. Non-finite readings become `None`, so each missing value
//! only hides the line that shows it.

use heapless::{String, Vec};
use jiff::civil::{Date, DateTime};
use log::debug;

use crate::classify::{Daylight, WeatherCode};
use crate::units::cardinal;

/// Maximum location label length in bytes. Longer labels are cut at a
/// character boundary.
pub const LOCATION_CAPACITY: usize = 32;

/// Maximum stored timestamp length in bytes.
pub const TIMESTAMP_CAPACITY: usize = 32;

/// Forecast days kept by the model. Only the first three are drawn.
pub const MAX_FORECAST_DAYS: usize = 7;

/// Copy `text` into a bounded string, dropping whole characters that do not fit.
fn bounded<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// =============================================================================
// Observation
// =============================================================================

/// Wind at the observation site.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Wind {
    speed_kmh: f32,
    direction_deg: f32,
}

impl Wind {
    /// Returns `None` unless both values are finite. The direction is
    /// normalized into `[0, 360)`.
    pub fn new(
        speed_kmh: f32,
        direction_deg: f32,
    ) -> Option<Self> {
        if !speed_kmh.is_finite() || !direction_deg.is_finite() {
            return None;
        }
        Some(Self {
            speed_kmh: speed_kmh.max(0.0),
            direction_deg: direction_deg.rem_euclid(360.0),
        })
    }

    pub const fn speed_kmh(&self) -> f32 { self.speed_kmh }

    pub const fn direction_deg(&self) -> f32 { self.direction_deg }

    /// 8-point compass label for the direction.
    pub fn cardinal(&self) -> &'static str { cardinal(self.direction_deg) }
}

/// Current conditions.
#[derive(Clone, PartialEq, Debug)]
pub struct Observation {
    temperature_c: Option<f32>,
    apparent_temperature_c: Option<f32>,
    wind: Option<Wind>,
    code: WeatherCode,
    daylight: Daylight,
    timestamp: String<TIMESTAMP_CAPACITY>,
}

impl Observation {
    /// A non-finite temperature is treated as missing.
    pub fn new(
        temperature_c: f32,
        code: WeatherCode,
    ) -> Self {
        if !temperature_c.is_finite() {
            debug!("observation without temperature ({temperature_c})");
        }
        Self {
            temperature_c: temperature_c.is_finite().then_some(temperature_c),
            apparent_temperature_c: None,
            wind: None,
            code,
            daylight: Daylight::Day,
            timestamp: String::new(),
        }
    }

    /// Non-finite values are treated as missing.
    #[must_use]
    pub fn with_apparent_temperature(
        mut self,
        celsius: f32,
    ) -> Self {
        self.apparent_temperature_c = celsius.is_finite().then_some(celsius);
        self
    }

    #[must_use]
    pub fn with_wind(
        mut self,
        wind: Option<Wind>,
    ) -> Self {
        self.wind = wind;
        self
    }

    #[must_use]
    pub fn with_daylight(
        mut self,
        daylight: Daylight,
    ) -> Self {
        self.daylight = daylight;
        self
    }

    /// ISO-8601 observation time, e.g. `2024-06-03T14:30`.
    #[must_use]
    pub fn with_timestamp(
        mut self,
        timestamp: &str,
    ) -> Self {
        self.timestamp = bounded(timestamp.trim());
        self
    }

    pub const fn temperature_c(&self) -> Option<f32> { self.temperature_c }

    pub const fn apparent_temperature_c(&self) -> Option<f32> { self.apparent_temperature_c }

    /// Apparent temperature, falling back to the measured one.
    pub fn feels_like_c(&self) -> Option<f32> { self.apparent_temperature_c.or(self.temperature_c) }

    pub const fn wind(&self) -> Option<Wind> { self.wind }

    pub const fn code(&self) -> WeatherCode { self.code }

    pub const fn daylight(&self) -> Daylight { self.daylight }

    pub fn timestamp(&self) -> &str { &self.timestamp }

    /// The timestamp as a civil date-time, if it parses.
    pub fn updated_at(&self) -> Option<DateTime> {
        if self.timestamp.is_empty() {
            return None;
        }
        match self.timestamp.parse::<DateTime>() {
            Ok(at) => Some(at),
            Err(err) => {
                debug!("unparseable observation timestamp {:?}: {err}", self.timestamp.as_str());
                None
            }
        }
    }
}

// =============================================================================
// Forecast
// =============================================================================

/// One day of the forecast.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DailyForecastEntry {
    pub date: Date,
    pub code: WeatherCode,
    pub max_c: f32,
    pub min_c: f32,
}

impl DailyForecastEntry {
    pub const fn new(
        date: Date,
        code: WeatherCode,
        max_c: f32,
        min_c: f32,
    ) -> Self {
        Self { date, code, max_c, min_c }
    }

    /// Both extremes are present.
    pub fn has_range(&self) -> bool { self.max_c.is_finite() && self.min_c.is_finite() }
}

// =============================================================================
// Presentation Model
// =============================================================================

/// Location, current conditions and a chronological forecast, first day = today.
#[derive(Clone, PartialEq, Debug)]
pub struct PresentationModel {
    location: String<LOCATION_CAPACITY>,
    current: Option<Observation>,
    forecast: Vec<DailyForecastEntry, MAX_FORECAST_DAYS>,
}

impl PresentationModel {
    /// Build a model.
    ///
    /// The location is trimmed and cut to [`LOCATION_CAPACITY`]. Forecast
    /// entries are sorted by date and the earliest [`MAX_FORECAST_DAYS`] are
    /// kept.
    pub fn new<I>(
        location: &str,
        current: Option<Observation>,
        forecast: I,
    ) -> Self
    where
        I: IntoIterator<Item = DailyForecastEntry>,
    {
        // Insertion keeps the earliest days in date order, equal dates in arrival order
        let mut days: Vec<DailyForecastEntry, MAX_FORECAST_DAYS> = Vec::new();
        let mut dropped = 0usize;
        for entry in forecast {
            let at = days.partition_point(|kept| kept.date <= entry.date);
            if at == MAX_FORECAST_DAYS {
                dropped += 1;
                continue;
            }
            if days.is_full() {
                days.pop();
                dropped += 1;
            }
            if days.insert(at, entry).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!("dropped {dropped} forecast days beyond the first {MAX_FORECAST_DAYS}");
        }

        Self {
            location: bounded(location.trim()),
            current,
            forecast: days,
        }
    }

    pub fn location(&self) -> &str { &self.location }

    pub const fn current(&self) -> Option<&Observation> { self.current.as_ref() }

    pub fn forecast(&self) -> &[DailyForecastEntry] { &self.forecast }
}
