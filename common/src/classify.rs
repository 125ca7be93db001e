//! Weather code classification.
//!
//! Codes follow the WMO synoptic table (0-99). Each code maps to exactly one
//! [`Pictogram`]; anything outside the known bands shows a plain cloud.

use crate::icons::Pictogram;

/// WMO weather interpretation code. Opaque: only the table below gives it meaning.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WeatherCode(pub u16);

impl From<u16> for WeatherCode {
    fn from(code: u16) -> Self { Self(code) }
}

/// Whether the sun is up at the observation site.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Daylight {
    #[default]
    Day,
    Night,
}

impl From<bool> for Daylight {
    fn from(is_day: bool) -> Self { if is_day { Self::Day } else { Self::Night } }
}

/// Pictogram for a weather code.
///
/// `daylight` does not change the result yet. There are no night pictograms.
pub const fn classify(
    code: WeatherCode,
    daylight: Daylight,
) -> Pictogram {
    let _ = daylight;
    match code.0 {
        0 => Pictogram::Sun,
        1 | 2 => Pictogram::SunCloud,
        3 => Pictogram::BrokenClouds,
        45 | 48 => Pictogram::Fog,
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 => Pictogram::Rain,
        80..=82 => Pictogram::ShowerRain,
        71 | 73 | 75 | 77 | 85 | 86 => Pictogram::Snow,
        95 | 96 | 99 => Pictogram::Thunderstorm,
        _ => Pictogram::Cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(code: u16) -> Pictogram {
        let bands: [(&[u16], Pictogram); 8] = [
            (&[0], Pictogram::Sun),
            (&[1, 2], Pictogram::SunCloud),
            (&[3], Pictogram::BrokenClouds),
            (&[45, 48], Pictogram::Fog),
            (&[51, 53, 55, 56, 57, 61, 63, 65, 66, 67], Pictogram::Rain),
            (&[80, 81, 82], Pictogram::ShowerRain),
            (&[71, 73, 75, 77, 85, 86], Pictogram::Snow),
            (&[95, 96, 99], Pictogram::Thunderstorm),
        ];
        bands
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map_or(Pictogram::Cloud, |(_, pictogram)| *pictogram)
    }

    #[test]
    fn test_full_wmo_range() {
        for code in 0..=99 {
            assert_eq!(classify(WeatherCode(code), Daylight::Day), expected(code), "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_fall_back_to_cloud() {
        for code in [4, 10, 44, 50, 58, 70, 79, 83, 94, 97, 100, 999, u16::MAX] {
            assert_eq!(classify(WeatherCode(code), Daylight::Day), Pictogram::Cloud);
        }
    }

    #[test]
    fn test_daylight_does_not_change_mapping() {
        for code in 0..=120 {
            assert_eq!(
                classify(WeatherCode(code), Daylight::Day),
                classify(WeatherCode(code), Daylight::Night)
            );
        }
        assert_eq!(Daylight::from(false), Daylight::Night);
    }
}
