//! Frame layout: from a [`PresentationModel`] to a painted canvas.
//!
//! Rendering runs in two steps. [`plan`] decides what goes where and returns
//! a [`FramePlan`] of placed texts, icons and dividers; [`paint`] draws that
//! plan onto a fresh canvas. [`render`] adds the mounting rotation and
//! [`publish`] hands the packed frame to a sink.
//!
//! Regions, top to bottom on the landscape canvas:
//!
//! - location header, centered
//! - current conditions: pictogram, Celsius and Fahrenheit, detail lines
//! - divider
//! - forecast strip, always split into [`FORECAST_COLUMNS`] columns
//!
//! Missing data skips only the element that needs it.

use core::fmt::{self, Write};

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};
use log::{debug, info};

use crate::canvas::{Canvas, measure_text};
use crate::classify::{Daylight, classify};
use crate::colors::INK;
use crate::config::{
    CURRENT_ICON_SIZE,
    CURRENT_ICON_X,
    CURRENT_ICON_Y,
    DETAIL_LINE_HEIGHT,
    DETAIL_X,
    DETAIL_Y,
    DIVIDER_Y,
    DisplayConfig,
    FORECAST_COLUMNS,
    FORECAST_DAY_Y,
    FORECAST_ICON_SIZE,
    FORECAST_ICON_Y,
    FORECAST_TEMP_Y,
    HEADER_Y,
    TEMP_F_Y,
    TEMP_X,
    TEMP_Y,
};
use crate::icons::{Pictogram, draw_pictogram};
use crate::model::{DailyForecastEntry, Observation, PresentationModel};
use crate::sink::{FrameSink, SinkError};
use crate::styles::FontRole;
use crate::units::{display_degrees, fahrenheit};

/// Upper bound on placed elements in one frame.
pub const MAX_ELEMENTS: usize = 24;

/// Longest single text element, in bytes.
pub const TEXT_CAPACITY: usize = 32;

/// Text of one element.
pub type Label = String<TEXT_CAPACITY>;

/// What a placed element is for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Slot {
    Header,
    Divider,
    CurrentIcon,
    Temperature,
    TemperatureFahrenheit,
    Wind,
    FeelsLike,
    Updated,
    ForecastDay(usize),
    ForecastIcon(usize),
    ForecastRange(usize),
}

/// A drawable element at its final position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Element {
    Text {
        text: Label,
        top_left: Point,
        role: FontRole,
    },
    Icon {
        pictogram: Pictogram,
        origin: Point,
        size: u32,
    },
    Divider {
        start: Point,
        end: Point,
    },
}

impl Element {
    /// Area the element may ink.
    pub fn region(&self) -> Rectangle {
        match self {
            Self::Text { text, top_left, role } => {
                let extent = measure_text(text, role.font());
                Rectangle::new(*top_left, Size::new(extent.width, extent.height))
            }
            Self::Icon { origin, size, .. } => Rectangle::new(*origin, Size::new(size + 1, size + 1)),
            Self::Divider { start, end } => Rectangle::with_corners(*start, *end),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Placed {
    pub slot: Slot,
    pub element: Element,
}

/// Every element of one frame, in paint order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FramePlan {
    size: Size,
    elements: Vec<Placed, MAX_ELEMENTS>,
}

impl FramePlan {
    fn new(size: Size) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    fn place(
        &mut self,
        slot: Slot,
        element: Element,
    ) {
        if self.elements.push(Placed { slot, element }).is_err() {
            debug!("frame plan full, dropping {slot:?}");
        }
    }

    /// Canvas size the plan was laid out for.
    pub const fn size(&self) -> Size { self.size }

    pub fn elements(&self) -> &[Placed] { &self.elements }

    pub fn get(
        &self,
        slot: Slot,
    ) -> Option<&Element> {
        self.elements.iter().find(|placed| placed.slot == slot).map(|placed| &placed.element)
    }

    pub fn text(
        &self,
        slot: Slot,
    ) -> Option<&str> {
        match self.get(slot)? {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn pictogram(
        &self,
        slot: Slot,
    ) -> Option<Pictogram> {
        match self.get(slot)? {
            Element::Icon { pictogram, .. } => Some(*pictogram),
            _ => None,
        }
    }

    /// Number of forecast columns that carry content.
    pub fn forecast_columns(&self) -> usize {
        self.elements
            .iter()
            .filter(|placed| matches!(placed.slot, Slot::ForecastIcon(_)))
            .count()
    }
}

fn label(args: fmt::Arguments<'_>) -> Label {
    let mut text = Label::new();
    if text.write_fmt(args).is_err() {
        debug!("label truncated: {text}");
    }
    text
}

/// Left edge that centers `text` within `[left, left + width)`.
fn centered_x(
    text: &str,
    role: FontRole,
    left: i32,
    width: u32,
) -> i32 {
    let extent = measure_text(text, role.font());
    left + (width as i32 - extent.width as i32) / 2
}

// =============================================================================
// Planning
// =============================================================================

/// Lay out `model` on a landscape canvas for `config.panel`.
pub fn plan(
    model: &PresentationModel,
    config: &DisplayConfig,
) -> FramePlan {
    let mut plan = FramePlan::new(config.panel.landscape());
    let width = plan.size.width;

    plan_header(&mut plan, model.location(), width);

    plan.place(
        Slot::Divider,
        Element::Divider {
            start: Point::new(0, DIVIDER_Y),
            end: Point::new(width as i32 - 1, DIVIDER_Y),
        },
    );

    match model.current() {
        Some(observation) => plan_current(&mut plan, observation),
        None => debug!("no current observation, skipping current conditions"),
    }

    plan_forecast(&mut plan, model.forecast(), width);
    plan
}

fn plan_header(
    plan: &mut FramePlan,
    location: &str,
    width: u32,
) {
    if location.is_empty() {
        debug!("no location, skipping header");
        return;
    }
    let text = label(format_args!("{location}"));
    let x = centered_x(&text, FontRole::Header, 0, width);
    plan.place(
        Slot::Header,
        Element::Text {
            text,
            top_left: Point::new(x, HEADER_Y),
            role: FontRole::Header,
        },
    );
}

fn plan_current(
    plan: &mut FramePlan,
    observation: &Observation,
) {
    plan.place(
        Slot::CurrentIcon,
        Element::Icon {
            pictogram: classify(observation.code(), observation.daylight()),
            origin: Point::new(CURRENT_ICON_X, CURRENT_ICON_Y),
            size: CURRENT_ICON_SIZE,
        },
    );

    match observation.temperature_c() {
        Some(celsius) => {
            plan.place(
                Slot::Temperature,
                Element::Text {
                    text: label(format_args!("{}°C", display_degrees(celsius))),
                    top_left: Point::new(TEMP_X, TEMP_Y),
                    role: FontRole::Value,
                },
            );
            plan.place(
                Slot::TemperatureFahrenheit,
                Element::Text {
                    text: label(format_args!("{}°F", display_degrees(fahrenheit(celsius)))),
                    top_left: Point::new(TEMP_X, TEMP_F_Y),
                    role: FontRole::Secondary,
                },
            );
        }
        None => debug!("no temperature, skipping readings"),
    }

    // Detail lines stack from the top, so a missing line leaves no gap
    let mut details: Vec<(Slot, Label), 3> = Vec::new();
    match observation.wind() {
        Some(wind) => {
            details
                .push((
                    Slot::Wind,
                    label(format_args!("{:.0}km/h {}", wind.speed_kmh(), wind.cardinal())),
                ))
                .ok();
        }
        None => debug!("no wind reading, skipping wind line"),
    }
    if let Some(feels_like) = observation.feels_like_c() {
        details
            .push((Slot::FeelsLike, label(format_args!("Feels {}°C", display_degrees(feels_like)))))
            .ok();
    }
    if let Some(at) = observation.updated_at() {
        details
            .push((Slot::Updated, label(format_args!("Upd {:02}:{:02}", at.hour(), at.minute()))))
            .ok();
    }

    for (row, (slot, text)) in details.into_iter().enumerate() {
        plan.place(
            slot,
            Element::Text {
                text,
                top_left: Point::new(DETAIL_X, DETAIL_Y + row as i32 * DETAIL_LINE_HEIGHT),
                role: FontRole::Label,
            },
        );
    }
}

fn plan_forecast(
    plan: &mut FramePlan,
    forecast: &[DailyForecastEntry],
    width: u32,
) {
    if forecast.is_empty() {
        debug!("no forecast entries, skipping forecast strip");
        return;
    }

    let column_width = width / FORECAST_COLUMNS;
    for (column, entry) in forecast.iter().take(FORECAST_COLUMNS as usize).enumerate() {
        let left = (column as u32 * column_width) as i32;

        let day = label(format_args!("{}", entry.date.strftime("%a")));
        plan.place(
            Slot::ForecastDay(column),
            Element::Text {
                top_left: Point::new(centered_x(&day, FontRole::Label, left, column_width), FORECAST_DAY_Y),
                text: day,
                role: FontRole::Label,
            },
        );

        plan.place(
            Slot::ForecastIcon(column),
            Element::Icon {
                pictogram: classify(entry.code, Daylight::Day),
                origin: Point::new(
                    left + (column_width as i32 - FORECAST_ICON_SIZE as i32) / 2,
                    FORECAST_ICON_Y,
                ),
                size: FORECAST_ICON_SIZE,
            },
        );

        if !entry.has_range() {
            debug!("forecast {} has no temperature range", entry.date);
            continue;
        }
        let range = label(format_args!(
            "{}/{}",
            display_degrees(entry.max_c),
            display_degrees(entry.min_c)
        ));
        plan.place(
            Slot::ForecastRange(column),
            Element::Text {
                top_left: Point::new(centered_x(&range, FontRole::Label, left, column_width), FORECAST_TEMP_Y),
                text: range,
                role: FontRole::Label,
            },
        );
    }
}

// =============================================================================
// Painting and Output
// =============================================================================

/// Draw every element of `plan`, in order, onto a blank canvas.
pub fn paint(plan: &FramePlan) -> Canvas {
    let mut canvas = Canvas::new(plan.size.width, plan.size.height);
    for placed in &plan.elements {
        match &placed.element {
            Element::Text { text, top_left, role } => canvas.text(text, *top_left, role.font(), INK),
            Element::Icon { pictogram, origin, size } => draw_pictogram(&mut canvas, *pictogram, *origin, *size),
            Element::Divider { start, end } => canvas.line(*start, *end, INK, 1),
        }
    }
    canvas
}

/// Render `model` to a landscape canvas, rotated for the configured mounting.
pub fn render(
    model: &PresentationModel,
    config: &DisplayConfig,
) -> Canvas {
    let canvas = paint(&plan(model, config));
    if config.mounting.needs_rotation() { canvas.rotate_180() } else { canvas }
}

/// Render `model` and show it on `sink`, leaving the panel asleep.
pub fn publish<S>(
    model: &PresentationModel,
    config: &DisplayConfig,
    sink: &mut S,
) -> Result<(), SinkError>
where
    S: FrameSink + ?Sized,
{
    let frame = render(model, config).to_panel_frame(config.panel)?;
    sink.initialize()?;
    sink.push_frame(&frame)?;
    sink.sleep()?;
    info!(
        "published {}x{} frame for {:?}",
        frame.width(),
        frame.height(),
        model.location()
    );
    Ok(())
}

/// Blank the panel and put it to sleep.
pub fn clear_panel<S>(sink: &mut S) -> Result<(), SinkError>
where
    S: FrameSink + ?Sized,
{
    sink.initialize()?;
    sink.clear()?;
    sink.sleep()?;
    info!("panel cleared");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use jiff::civil::{Date, date};

    use super::*;
    use crate::classify::WeatherCode;
    use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, Mounting, PANEL_HEIGHT, PANEL_WIDTH, PanelGeometry};
    use crate::model::Wind;
    use crate::sink::{NullSink, SinkEvent};

    const MONDAY: Date = date(2024, 6, 3);

    fn upright() -> DisplayConfig {
        DisplayConfig {
            mounting: Mounting::Upright,
            ..DisplayConfig::default()
        }
    }

    fn day(offset: i8) -> Date { date(2024, 6, 3 + offset) }

    fn test_city() -> PresentationModel {
        let current = Observation::new(20.0, WeatherCode(0)).with_wind(Wind::new(10.0, 0.0));
        let forecast = [
            DailyForecastEntry::new(day(0), WeatherCode(1), 25.0, 15.0),
            DailyForecastEntry::new(day(1), WeatherCode(61), 18.0, 10.0),
            DailyForecastEntry::new(day(2), WeatherCode(95), 22.0, 12.0),
        ];
        PresentationModel::new("Test City", Some(current), forecast)
    }

    fn icon_alone(
        element: &Element,
        size: Size,
    ) -> Canvas {
        let mut canvas = Canvas::new(size.width, size.height);
        if let Element::Icon { pictogram, origin, size } = element {
            draw_pictogram(&mut canvas, *pictogram, *origin, *size);
        }
        canvas
    }

    /// Pixels of `region` on `a` and `b` agree.
    fn same_region(
        a: &Canvas,
        b: &Canvas,
        region: Rectangle,
    ) -> bool {
        region.points().all(|p| a.pixel(p) == b.pixel(p))
    }

    #[test]
    fn test_city_header_is_centered() {
        let plan = plan(&test_city(), &upright());
        assert_eq!(plan.size(), Size::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(plan.text(Slot::Header), Some("Test City"));

        let region = plan.get(Slot::Header).unwrap().region();
        let left = region.top_left.x;
        let right = CANVAS_WIDTH as i32 - (left + region.size.width as i32);
        assert!((left - right).abs() <= 1, "left {left} right {right}");
        assert_eq!(left, (250 - 63) / 2);
    }

    #[test]
    fn test_city_current_conditions() {
        let plan = plan(&test_city(), &upright());
        assert_eq!(plan.pictogram(Slot::CurrentIcon), Some(Pictogram::Sun));
        assert_eq!(plan.text(Slot::Temperature), Some("20°C"));
        assert_eq!(plan.text(Slot::TemperatureFahrenheit), Some("68°F"));
        assert_eq!(plan.text(Slot::Wind), Some("10km/h N"));
        assert_eq!(plan.text(Slot::FeelsLike), Some("Feels 20°C"));
        assert_eq!(plan.text(Slot::Updated), None);

        // The painted icon region holds exactly the sun pictogram
        let canvas = paint(&plan);
        let icon = plan.get(Slot::CurrentIcon).unwrap();
        assert!(same_region(&canvas, &icon_alone(icon, plan.size()), icon.region()));
        assert!(canvas.ink_count_in(&icon.region()) > 0);
    }

    #[test]
    fn test_city_forecast_columns() {
        let plan = plan(&test_city(), &upright());
        assert_eq!(plan.forecast_columns(), 3);

        let pictograms: Vec<_, 3> = (0..3).map(|i| plan.pictogram(Slot::ForecastIcon(i)).unwrap()).collect();
        assert_eq!(pictograms, [Pictogram::SunCloud, Pictogram::Rain, Pictogram::Thunderstorm]);

        let days: Vec<_, 3> = (0..3).map(|i| plan.text(Slot::ForecastDay(i)).unwrap()).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed"]);
        let ranges: Vec<_, 3> = (0..3).map(|i| plan.text(Slot::ForecastRange(i)).unwrap()).collect();
        assert_eq!(ranges, ["25/15", "18/10", "22/12"]);

        let canvas = paint(&plan);
        let column_width = CANVAS_WIDTH / FORECAST_COLUMNS;
        for column in 0..3 {
            let icon = plan.get(Slot::ForecastIcon(column)).unwrap();
            let region = icon.region();
            let left = column as i32 * column_width as i32;
            assert!(region.top_left.x >= left);
            assert!(region.top_left.x + region.size.width as i32 <= left + column_width as i32);
            assert!(same_region(&canvas, &icon_alone(icon, plan.size()), region));
        }
    }

    #[test]
    fn test_forecast_labels_are_centered_in_columns() {
        let plan = plan(&test_city(), &upright());
        // "Mon" is 18px wide in an 83px column
        assert_eq!(
            plan.get(Slot::ForecastDay(0)).unwrap().region().top_left,
            Point::new(32, FORECAST_DAY_Y)
        );
        // "18/10" is 30px wide; second column starts at 83
        assert_eq!(
            plan.get(Slot::ForecastRange(1)).unwrap().region().top_left,
            Point::new(83 + 26, FORECAST_TEMP_Y)
        );
    }

    #[test]
    fn test_single_entry_draws_one_column() {
        let model = PresentationModel::new(
            "Test City",
            Some(Observation::new(20.0, WeatherCode(0))),
            [DailyForecastEntry::new(MONDAY, WeatherCode(3), 25.0, 15.0)],
        );
        let plan = plan(&model, &upright());
        assert_eq!(plan.forecast_columns(), 1);
        assert_eq!(plan.pictogram(Slot::ForecastIcon(0)), Some(Pictogram::BrokenClouds));
        assert!(plan.get(Slot::ForecastIcon(1)).is_none());

        let canvas = paint(&plan);
        let column_width = CANVAS_WIDTH / FORECAST_COLUMNS;
        let rest = Rectangle::with_corners(
            Point::new(column_width as i32, DIVIDER_Y + 1),
            Point::new(CANVAS_WIDTH as i32 - 1, CANVAS_HEIGHT as i32 - 1),
        );
        assert_eq!(canvas.ink_count_in(&rest), 0);
    }

    #[test]
    fn test_feels_like_falls_back_to_temperature() {
        let without = PresentationModel::new("X", Some(Observation::new(21.8, WeatherCode(0))), []);
        assert_eq!(plan(&without, &upright()).text(Slot::FeelsLike), Some("Feels 21°C"));

        let with = PresentationModel::new(
            "X",
            Some(Observation::new(21.8, WeatherCode(0)).with_apparent_temperature(17.4)),
            [],
        );
        assert_eq!(plan(&with, &upright()).text(Slot::FeelsLike), Some("Feels 17°C"));
    }

    #[test]
    fn test_missing_temperature_skips_only_readings() {
        let observation = Observation::new(f32::NAN, WeatherCode(0))
            .with_wind(Wind::new(10.0, 90.0))
            .with_apparent_temperature(18.0);
        let model = PresentationModel::new("X", Some(observation), []);
        let plan = plan(&model, &upright());

        assert_eq!(plan.pictogram(Slot::CurrentIcon), Some(Pictogram::Sun));
        assert!(plan.get(Slot::Temperature).is_none());
        assert!(plan.get(Slot::TemperatureFahrenheit).is_none());
        assert_eq!(plan.text(Slot::Wind), Some("10km/h E"));
        assert_eq!(plan.text(Slot::FeelsLike), Some("Feels 18°C"));

        // Without any temperature the feels-like line goes too
        let model = PresentationModel::new("X", Some(Observation::new(f32::NAN, WeatherCode(3))), []);
        let plan = super::plan(&model, &upright());
        assert_eq!(plan.pictogram(Slot::CurrentIcon), Some(Pictogram::BrokenClouds));
        assert!(plan.get(Slot::FeelsLike).is_none());
    }

    #[test]
    fn test_widest_reading_clears_detail_block() {
        let model = PresentationModel::new("X", Some(Observation::new(-40.0, WeatherCode(0))), []);
        let plan = plan(&model, &upright());
        assert_eq!(plan.text(Slot::Temperature), Some("-40°C"));
        assert_eq!(plan.text(Slot::TemperatureFahrenheit), Some("-40°F"));

        let region = plan.get(Slot::Temperature).unwrap().region();
        assert!(region.top_left.x + (region.size.width as i32) < DETAIL_X);

        // The degree sign is a real glyph, not the replacement character
        let degree = measure_text("°", FontRole::Value.font());
        let mut canvas = Canvas::new(degree.width * 2, degree.height);
        canvas.text("°", Point::zero(), FontRole::Value.font(), INK);
        canvas.text("?", Point::new(degree.width as i32, 0), FontRole::Value.font(), INK);
        let half = Size::new(degree.width, degree.height);
        let sign = Rectangle::new(Point::zero(), half);
        let replacement = Rectangle::new(Point::new(degree.width as i32, 0), half);
        assert!(canvas.ink_count_in(&sign) > 0);
        assert_ne!(canvas.ink_count_in(&sign), canvas.ink_count_in(&replacement));
    }

    #[test]
    fn test_detail_lines_stack_without_gaps() {
        let observation = Observation::new(20.0, WeatherCode(0)).with_timestamp("2024-06-03T07:05");
        let model = PresentationModel::new("X", Some(observation), []);
        let plan = plan(&model, &upright());

        assert!(plan.get(Slot::Wind).is_none());
        assert_eq!(plan.text(Slot::Updated), Some("Upd 07:05"));
        assert_eq!(plan.get(Slot::FeelsLike).unwrap().region().top_left, Point::new(DETAIL_X, DETAIL_Y));
        assert_eq!(
            plan.get(Slot::Updated).unwrap().region().top_left,
            Point::new(DETAIL_X, DETAIL_Y + DETAIL_LINE_HEIGHT)
        );
    }

    #[test]
    fn test_missing_sections_are_skipped() {
        let model = PresentationModel::new("", None, []);
        let plan = plan(&model, &upright());
        assert_eq!(plan.elements().len(), 1);
        assert!(plan.get(Slot::Divider).is_some());

        let canvas = paint(&plan);
        assert_eq!(canvas.ink_count(), CANVAS_WIDTH as usize);
    }

    #[test]
    fn test_missing_range_skips_only_the_label() {
        let model = PresentationModel::new(
            "X",
            None,
            [DailyForecastEntry::new(MONDAY, WeatherCode(45), f32::NAN, 3.0)],
        );
        let plan = plan(&model, &upright());
        assert_eq!(plan.pictogram(Slot::ForecastIcon(0)), Some(Pictogram::Fog));
        assert_eq!(plan.text(Slot::ForecastDay(0)), Some("Mon"));
        assert!(plan.get(Slot::ForecastRange(0)).is_none());
    }

    #[test]
    fn test_render_applies_mounting_rotation() {
        let model = test_city();
        let upright_canvas = render(&model, &upright());
        let inverted_canvas = render(&model, &DisplayConfig::default());
        assert_eq!(upright_canvas, paint(&plan(&model, &upright())));
        assert_eq!(inverted_canvas, upright_canvas.rotate_180());
        assert_ne!(inverted_canvas, upright_canvas);
    }

    #[test]
    fn test_publish_drives_sink_in_order() {
        let model = test_city();
        let config = DisplayConfig::default();
        let mut sink = NullSink::new();
        publish(&model, &config, &mut sink).unwrap();

        let events: Vec<_, 3> = sink.events().collect();
        assert_eq!(events, [SinkEvent::Initialize, SinkEvent::PushFrame, SinkEvent::Sleep]);

        let frame = sink.last_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (PANEL_WIDTH, PANEL_HEIGHT));
        assert_eq!(frame.as_bytes().len(), PanelGeometry::EPD_2IN13_V4.frame_len());
        assert_eq!(
            frame,
            &render(&model, &config).to_panel_frame(PanelGeometry::EPD_2IN13_V4).unwrap()
        );
    }

    #[test]
    fn test_clear_panel_blanks_then_sleeps() {
        let mut sink = NullSink::new();
        clear_panel(&mut sink).unwrap();
        let events: Vec<_, 3> = sink.events().collect();
        assert_eq!(events, [SinkEvent::Initialize, SinkEvent::Clear, SinkEvent::Sleep]);
    }
}
