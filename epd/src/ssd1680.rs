//! Blocking SSD1680 driver.
//!
//! The panel RAM is written row by row, most significant bit first, one bit
//! per pixel with 1 = white. That is exactly the layout of a
//! [`PanelFrame`], so frames are streamed without conversion.
//!
//! Every update is a full refresh. Partial refresh waveforms are not used.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use embedded_hal::spi::{Error as _, SpiDevice};
use log::{debug, warn};
use weather_common::canvas::{FrameError, PanelFrame};
use weather_common::config::PanelGeometry;
use weather_common::sink::{FrameSink, SinkError};

// SSD1680 Commands
const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
const DEEP_SLEEP_MODE: u8 = 0x10;
const DATA_ENTRY_MODE: u8 = 0x11;
const SW_RESET: u8 = 0x12;
const TEMPERATURE_SENSOR: u8 = 0x18;
const MASTER_ACTIVATION: u8 = 0x20;
const DISPLAY_UPDATE_CONTROL_1: u8 = 0x21;
const DISPLAY_UPDATE_CONTROL_2: u8 = 0x22;
const WRITE_RAM_BW: u8 = 0x24;
const BORDER_WAVEFORM: u8 = 0x3C;
const SET_RAM_X_RANGE: u8 = 0x44;
const SET_RAM_Y_RANGE: u8 = 0x45;
const SET_RAM_X_COUNTER: u8 = 0x4E;
const SET_RAM_Y_COUNTER: u8 = 0x4F;

// Command arguments
const DATA_ENTRY_X_INC_Y_INC: u8 = 0x03;
const BORDER_FOLLOW_LUT: u8 = 0x05;
const SOURCE_RANGE_S8_TO_S167: u8 = 0x80;
const INTERNAL_TEMPERATURE_SENSOR: u8 = 0x80;
const FULL_UPDATE_SEQUENCE: u8 = 0xF7;
const DEEP_SLEEP_MODE_1: u8 = 0x01;

/// Poll interval while the BUSY line is high.
pub const BUSY_POLL_MS: u32 = 10;

/// Polls before giving up. A full refresh takes about two seconds.
pub const BUSY_MAX_POLLS: u32 = 1000;

/// SSD1680 panel driven through `embedded-hal` traits.
///
/// - `SPI`: device with chip select handled by the bus implementation
/// - `DC`: data/command select, low for commands
/// - `RST`: active-low reset
/// - `BUSY`: high while the controller is working
pub struct Ssd1680Sink<SPI, DC, RST, BUSY, DELAY> {
    spi: SPI,
    dc: DC,
    rst: RST,
    busy: BUSY,
    delay: DELAY,
    geometry: PanelGeometry,
    initialized: bool,
}

impl<SPI, DC, RST, BUSY, DELAY> Ssd1680Sink<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    pub const fn new(
        spi: SPI,
        dc: DC,
        rst: RST,
        busy: BUSY,
        delay: DELAY,
        geometry: PanelGeometry,
    ) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            delay,
            geometry,
            initialized: false,
        }
    }

    pub const fn geometry(&self) -> PanelGeometry { self.geometry }

    pub const fn is_initialized(&self) -> bool { self.initialized }

    /// Give back the bus, pins and delay.
    pub fn release(self) -> (SPI, DC, RST, BUSY, DELAY) { (self.spi, self.dc, self.rst, self.busy, self.delay) }

    fn pin_result<E: embedded_hal::digital::Error>(result: Result<(), E>) -> Result<(), SinkError> {
        result.map_err(|err| SinkError::Pin(format!("{:?}", err.kind())))
    }

    /// Send a command byte (DC low).
    fn write_command(
        &mut self,
        command: u8,
    ) -> Result<(), SinkError> {
        Self::pin_result(self.dc.set_low())?;
        self.spi
            .write(&[command])
            .map_err(|err| SinkError::Bus(format!("{:?}", err.kind())))
    }

    /// Send data bytes (DC high).
    fn write_data(
        &mut self,
        data: &[u8],
    ) -> Result<(), SinkError> {
        Self::pin_result(self.dc.set_high())?;
        self.spi
            .write(data)
            .map_err(|err| SinkError::Bus(format!("{:?}", err.kind())))
    }

    fn command(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> Result<(), SinkError> {
        self.write_command(command)?;
        if data.is_empty() { Ok(()) } else { self.write_data(data) }
    }

    fn hardware_reset(&mut self) -> Result<(), SinkError> {
        Self::pin_result(self.rst.set_high())?;
        self.delay.delay_ms(20);
        Self::pin_result(self.rst.set_low())?;
        self.delay.delay_ms(2);
        Self::pin_result(self.rst.set_high())?;
        self.delay.delay_ms(20);
        Ok(())
    }

    fn wait_until_idle(&mut self) -> Result<(), SinkError> {
        for _ in 0..BUSY_MAX_POLLS {
            let busy = self
                .busy
                .is_high()
                .map_err(|err| SinkError::Pin(format!("{:?}", err.kind())))?;
            if !busy {
                return Ok(());
            }
            self.delay.delay_ms(BUSY_POLL_MS);
        }
        let waited = BUSY_MAX_POLLS * BUSY_POLL_MS;
        warn!("ssd1680 busy for {waited} ms, giving up");
        Err(SinkError::BusyTimeout(waited))
    }

    /// Full-screen RAM window, cursor at the origin.
    fn set_window(&mut self) -> Result<(), SinkError> {
        let x_end = ((self.geometry.width - 1) >> 3) as u8;
        let y_end = self.geometry.height - 1;

        self.command(SET_RAM_X_RANGE, &[0x00, x_end])?;
        self.command(SET_RAM_Y_RANGE, &[0x00, 0x00, y_end as u8, (y_end >> 8) as u8])?;
        self.set_cursor()
    }

    fn set_cursor(&mut self) -> Result<(), SinkError> {
        self.command(SET_RAM_X_COUNTER, &[0x00])?;
        self.command(SET_RAM_Y_COUNTER, &[0x00, 0x00])
    }

    fn write_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        if !self.initialized {
            return Err(SinkError::NotInitialized);
        }
        if frame.width() != self.geometry.width || frame.height() != self.geometry.height {
            return Err(FrameError::SizeMismatch {
                canvas_width: frame.width(),
                canvas_height: frame.height(),
                panel_width: self.geometry.width,
                panel_height: self.geometry.height,
            }
            .into());
        }

        self.set_cursor()?;
        self.command(WRITE_RAM_BW, frame.as_bytes())?;
        self.command(DISPLAY_UPDATE_CONTROL_2, &[FULL_UPDATE_SEQUENCE])?;
        self.command(MASTER_ACTIVATION, &[])?;
        self.wait_until_idle()
    }
}

impl<SPI, DC, RST, BUSY, DELAY> FrameSink for Ssd1680Sink<SPI, DC, RST, BUSY, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn initialize(&mut self) -> Result<(), SinkError> {
        self.hardware_reset()?;
        self.wait_until_idle()?;
        self.command(SW_RESET, &[])?;
        self.wait_until_idle()?;

        let gates = self.geometry.height - 1;
        self.command(DRIVER_OUTPUT_CONTROL, &[gates as u8, (gates >> 8) as u8, 0x00])?;
        self.command(DATA_ENTRY_MODE, &[DATA_ENTRY_X_INC_Y_INC])?;
        self.set_window()?;
        self.command(BORDER_WAVEFORM, &[BORDER_FOLLOW_LUT])?;
        self.command(DISPLAY_UPDATE_CONTROL_1, &[0x00, SOURCE_RANGE_S8_TO_S167])?;
        self.command(TEMPERATURE_SENSOR, &[INTERNAL_TEMPERATURE_SENSOR])?;
        self.wait_until_idle()?;

        self.initialized = true;
        debug!("ssd1680 initialized ({}x{})", self.geometry.width, self.geometry.height);
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        self.write_frame(frame)?;
        debug!("ssd1680 refreshed {} bytes", frame.as_bytes().len());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SinkError> { self.write_frame(&PanelFrame::blank(self.geometry)) }

    fn sleep(&mut self) -> Result<(), SinkError> {
        self.command(DEEP_SLEEP_MODE, &[DEEP_SLEEP_MODE_1])?;
        self.delay.delay_ms(100);
        self.initialized = false;
        debug!("ssd1680 in deep sleep");
        Ok(())
    }
}
