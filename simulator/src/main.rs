//! Weather panel preview for the desktop.
//!
//! Renders a sample model through the same layout and sink path the panel
//! uses and saves the frame as a PNG instead of refreshing an e-paper panel.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `WEATHER_PREVIEW_PATH` | output file (default `weather-preview.png`) |
//! | `WEATHER_PANEL_SINK` | `null` renders without writing a file |
//! | `WEATHER_PANEL_MOUNTING` | `upright` skips the 180 degree turn |
//! | `RUST_LOG` | log filter (default `info`) |

mod preview;
mod sample;

use anyhow::Context;
use jiff::Zoned;
use log::info;
use weather_common::config::DisplayConfig;
use weather_common::layout::publish;
use weather_common::sink::AnySink;

use crate::preview::PreviewSink;
use crate::sample::sample_model;

const PREVIEW_PATH_KEY: &str = "WEATHER_PREVIEW_PATH";
const DEFAULT_PREVIEW_PATH: &str = "weather-preview.png";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DisplayConfig::from_env().context("invalid display configuration")?;
    let path = std::env::var(PREVIEW_PATH_KEY).unwrap_or_else(|_| DEFAULT_PREVIEW_PATH.to_owned());
    info!("config: {config:?}");

    let model = sample_model(&Zoned::now());
    let mut sink = AnySink::select(config.sink, || Ok(PreviewSink::new(&path, config.panel)))?;
    publish(&model, &config, &mut sink).context("publishing preview frame")?;

    if let AnySink::Hardware(preview) = &sink {
        println!("{}", preview.path().display());
    }
    Ok(())
}
