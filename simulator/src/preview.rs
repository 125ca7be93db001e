//! PNG preview sink.

use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use log::info;
use weather_common::canvas::PanelFrame;
use weather_common::config::PanelGeometry;
use weather_common::sink::{FrameSink, SinkError};

/// Pixel scale of the saved image.
const PREVIEW_SCALE: u32 = 3;

/// Writes each pushed frame to a PNG file, exactly as the panel would receive it.
pub struct PreviewSink {
    path: PathBuf,
    geometry: PanelGeometry,
    output_settings: OutputSettings,
    awake: bool,
}

impl PreviewSink {
    pub fn new(
        path: impl Into<PathBuf>,
        geometry: PanelGeometry,
    ) -> Self {
        Self {
            path: path.into(),
            geometry,
            output_settings: OutputSettingsBuilder::new()
                .theme(BinaryColorTheme::LcdWhite)
                .scale(PREVIEW_SCALE)
                .build(),
            awake: false,
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn save(
        &self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        if !self.awake {
            return Err(SinkError::NotInitialized);
        }
        let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(Size::new(frame.width(), frame.height()));
        display.draw_iter(frame.pixels()).ok();
        display
            .to_rgb_output_image(&self.output_settings)
            .save_png(&self.path)
            .map_err(|err| SinkError::Output(format!("{}: {err}", self.path.display())))?;
        info!("preview written to {}", self.path.display());
        Ok(())
    }
}

impl FrameSink for PreviewSink {
    fn initialize(&mut self) -> Result<(), SinkError> {
        self.awake = true;
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        self.save(frame)
    }

    fn clear(&mut self) -> Result<(), SinkError> { self.save(&PanelFrame::blank(self.geometry)) }

    fn sleep(&mut self) -> Result<(), SinkError> {
        self.awake = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf { std::env::temp_dir().join(format!("weather-preview-{}-{name}.png", std::process::id())) }

    #[test]
    fn test_push_frame_writes_png() {
        let path = scratch_path("push");
        let mut sink = PreviewSink::new(&path, PanelGeometry::EPD_2IN13_V4);
        sink.initialize().unwrap();
        sink.push_frame(&PanelFrame::blank(PanelGeometry::EPD_2IN13_V4)).unwrap();
        sink.sleep().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_requires_initialize() {
        let path = scratch_path("asleep");
        let mut sink = PreviewSink::new(&path, PanelGeometry::EPD_2IN13_V4);
        assert_eq!(sink.clear(), Err(SinkError::NotInitialized));
        assert!(!path.exists());
    }
}
