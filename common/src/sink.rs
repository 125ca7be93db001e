//! Frame sinks: whatever receives finished panel frames.
//!
//! A sink is driven in a fixed order per update: `initialize`, then
//! `push_frame` or `clear`, then `sleep`. [`AnySink`] picks the
//! implementation from [`SinkKind`] so a missing panel is a configuration
//! choice, not an error path.

use heapless::Deque;
use log::debug;
use thiserror::Error;

use crate::canvas::{FrameError, PanelFrame};
use crate::config::SinkKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("bus error: {0}")]
    Bus(String),
    #[error("pin error: {0}")]
    Pin(String),
    #[error("panel still busy after {0} ms")]
    BusyTimeout(u32),
    #[error("panel used before initialize")]
    NotInitialized,
    #[error("output error: {0}")]
    Output(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Receives finished frames and manages panel power.
pub trait FrameSink {
    /// Wake the panel and prepare it for a frame.
    fn initialize(&mut self) -> Result<(), SinkError>;

    /// Display `frame`.
    fn push_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError>;

    /// Blank the panel to paper.
    fn clear(&mut self) -> Result<(), SinkError>;

    /// Enter low-power mode. The next use needs `initialize` again.
    fn sleep(&mut self) -> Result<(), SinkError>;
}

// =============================================================================
// Null Sink
// =============================================================================

/// Number of recent calls a [`NullSink`] remembers.
pub const NULL_SINK_HISTORY: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SinkEvent {
    Initialize,
    PushFrame,
    Clear,
    Sleep,
}

/// Sink that drops frames. Remembers recent calls and the last frame.
#[derive(Default, Debug)]
pub struct NullSink {
    events: Deque<SinkEvent, NULL_SINK_HISTORY>,
    last_frame: Option<PanelFrame>,
}

impl NullSink {
    pub fn new() -> Self { Self::default() }

    fn record(
        &mut self,
        event: SinkEvent,
    ) {
        if self.events.is_full() {
            self.events.pop_front();
        }
        self.events.push_back(event).ok();
        debug!("null sink: {event:?}");
    }

    /// Recorded calls, oldest first.
    pub fn events(&self) -> impl Iterator<Item = SinkEvent> + '_ { self.events.iter().copied() }

    pub const fn last_frame(&self) -> Option<&PanelFrame> { self.last_frame.as_ref() }
}

impl FrameSink for NullSink {
    fn initialize(&mut self) -> Result<(), SinkError> {
        self.record(SinkEvent::Initialize);
        Ok(())
    }

    fn push_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        self.record(SinkEvent::PushFrame);
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SinkError> {
        self.record(SinkEvent::Clear);
        self.last_frame = None;
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), SinkError> {
        self.record(SinkEvent::Sleep);
        Ok(())
    }
}

// =============================================================================
// Sink Selection
// =============================================================================

/// Either a hardware sink or a [`NullSink`], chosen by configuration.
#[derive(Debug)]
pub enum AnySink<H> {
    Hardware(H),
    Null(NullSink),
}

impl<H: FrameSink> AnySink<H> {
    /// Build the sink for `kind`. `hardware` is only called for
    /// [`SinkKind::Hardware`]; its error is returned as-is.
    pub fn select<F>(
        kind: SinkKind,
        hardware: F,
    ) -> Result<Self, SinkError>
    where
        F: FnOnce() -> Result<H, SinkError>,
    {
        match kind {
            SinkKind::Hardware => hardware().map(Self::Hardware),
            SinkKind::Null => Ok(Self::Null(NullSink::new())),
        }
    }

    fn inner(&mut self) -> &mut dyn FrameSink {
        match self {
            Self::Hardware(sink) => sink,
            Self::Null(sink) => sink,
        }
    }
}

impl<H: FrameSink> FrameSink for AnySink<H> {
    fn initialize(&mut self) -> Result<(), SinkError> { self.inner().initialize() }

    fn push_frame(
        &mut self,
        frame: &PanelFrame,
    ) -> Result<(), SinkError> {
        self.inner().push_frame(frame)
    }

    fn clear(&mut self) -> Result<(), SinkError> { self.inner().clear() }

    fn sleep(&mut self) -> Result<(), SinkError> { self.inner().sleep() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelGeometry;

    struct Unplugged;

    impl FrameSink for Unplugged {
        fn initialize(&mut self) -> Result<(), SinkError> { Err(SinkError::Bus("no panel".into())) }

        fn push_frame(
            &mut self,
            _frame: &PanelFrame,
        ) -> Result<(), SinkError> {
            Err(SinkError::NotInitialized)
        }

        fn clear(&mut self) -> Result<(), SinkError> { Err(SinkError::NotInitialized) }

        fn sleep(&mut self) -> Result<(), SinkError> { Ok(()) }
    }

    #[test]
    fn test_null_sink_records_calls_in_order() {
        let mut sink = NullSink::new();
        let frame = PanelFrame::blank(PanelGeometry::EPD_2IN13_V4);
        sink.initialize().unwrap();
        sink.push_frame(&frame).unwrap();
        sink.clear().unwrap();
        sink.sleep().unwrap();

        let events: Vec<_> = sink.events().collect();
        assert_eq!(
            events,
            [SinkEvent::Initialize, SinkEvent::PushFrame, SinkEvent::Clear, SinkEvent::Sleep]
        );
        assert!(sink.last_frame().is_none());
    }

    #[test]
    fn test_null_sink_keeps_last_frame_and_bounded_history() {
        let mut sink = NullSink::new();
        let frame = PanelFrame::blank(PanelGeometry::EPD_2IN13_V4);
        for _ in 0..NULL_SINK_HISTORY {
            sink.push_frame(&frame).unwrap();
        }
        sink.sleep().unwrap();
        assert_eq!(sink.events().count(), NULL_SINK_HISTORY);
        assert_eq!(sink.events().last(), Some(SinkEvent::Sleep));
        assert_eq!(sink.last_frame(), Some(&frame));
    }

    #[test]
    fn test_select_follows_configuration() {
        let mut null = AnySink::<Unplugged>::select(SinkKind::Null, || panic!("hardware not wanted")).unwrap();
        assert!(matches!(null, AnySink::Null(_)));
        assert!(null.initialize().is_ok());

        let mut hardware = AnySink::select(SinkKind::Hardware, || Ok(Unplugged)).unwrap();
        assert_eq!(hardware.initialize(), Err(SinkError::Bus("no panel".into())));
    }

    #[test]
    fn test_select_does_not_fall_back_on_error() {
        let result = AnySink::<Unplugged>::select(SinkKind::Hardware, || Err(SinkError::Pin("busy".into())));
        assert!(matches!(result, Err(SinkError::Pin(_))));
    }
}
