//! Log-based trace sink adapter.
//!
//! Implements [`TraceSink`] by writing one line per [`ServoEvent`] to the
//! `log` facade (UART / USB-CDC on the target, whatever logger the firmware
//! installs).  Lines read `Servo #<id>: <message>`.
//!
//! Building without the `trace` feature turns [`LogTraceSink::emit`] into
//! an empty function, so production builds pay nothing for tracing.

use crate::app::events::ServoEvent;
use crate::app::ports::TraceSink;

/// Adapter that logs every [`ServoEvent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTraceSink;

impl LogTraceSink {
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for LogTraceSink {
    #[cfg(feature = "trace")]
    fn emit(&mut self, event: &ServoEvent) {
        use log::{debug, error, warn};

        let unit = event.unit();
        match event {
            ServoEvent::Created { .. } => debug!("Servo #{}: {}", unit, event),
            ServoEvent::CheckFailed { .. } | ServoEvent::ControllerFailed { .. } => {
                error!("Servo #{}: {}", unit, event);
            }
            _ => warn!("Servo #{}: {}", unit, event),
        }
    }

    #[cfg(not(feature = "trace"))]
    #[inline(always)]
    fn emit(&mut self, _event: &ServoEvent) {}
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    #[inline(always)]
    fn emit(&mut self, _event: &ServoEvent) {}
}
