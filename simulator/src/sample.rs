//! Built-in sample conditions for the preview.

use jiff::civil::Date;
use jiff::{ToSpan, Zoned};
use weather_common::classify::{Daylight, WeatherCode};
use weather_common::model::{DailyForecastEntry, Observation, PresentationModel, Wind};

/// (code, max, min) for today and the next days.
const FORECAST: [(u16, f32, f32); 3] = [(1, 25.0, 15.0), (61, 18.0, 10.0), (95, 22.0, 12.0)];

/// A fixed sample observed at `now`, with a forecast starting today.
pub fn sample_model(now: &Zoned) -> PresentationModel {
    let observation = Observation::new(20.4, WeatherCode(2))
        .with_apparent_temperature(18.9)
        .with_wind(Wind::new(10.0, 315.0))
        .with_daylight(Daylight::from((6..20).contains(&now.hour())))
        .with_timestamp(&now.strftime("%Y-%m-%dT%H:%M").to_string());

    let today = now.date();
    let forecast = FORECAST
        .iter()
        .zip(0i64..)
        .filter_map(|(&(code, max, min), offset)| {
            let date: Date = today.checked_add(offset.days()).ok()?;
            Some(DailyForecastEntry::new(date, WeatherCode(code), max, min))
        });

    PresentationModel::new("Test City", Some(observation), forecast)
}
