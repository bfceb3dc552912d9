//! Port traits: the boundary between the servo core and the outside world.
//!
//! ```text
//!   ServoUnit / fleet ──▶ ControllerPort ──▶ Maestro (serial) / simulator
//!                     └─▶ TraceSink      ──▶ log facade / nowhere
//! ```
//!
//! Ports are injected at every call site that needs them.  Units never
//! own the controller: one gateway serves every unit, and the `&mut`
//! borrow gives each call exclusive use of the bus.

use crate::error::ControllerError;
use crate::limits::MAESTRO_PULSE_SCALE;

use super::events::ServoEvent;

// ───────────────────────────────────────────────────────────────
// Controller port (driven adapter: domain → servo controller)
// ───────────────────────────────────────────────────────────────

/// The servo controller gateway.
///
/// Targets and positions are in the controller's native pulse units
/// (microseconds × [`pulse_scale`](Self::pulse_scale)).
pub trait ControllerPort {
    /// Number of addressable channels; valid channels are `0..channel_count()`.
    fn channel_count(&self) -> u8;

    /// Native pulse units per microsecond.
    fn pulse_scale(&self) -> i32 {
        MAESTRO_PULSE_SCALE
    }

    /// Command one channel to a target pulse width.
    fn set_target(&mut self, channel: u8, target: u16) -> Result<(), ControllerError>;

    /// Last pulse width the controller reports for a channel.
    fn get_position(&mut self, channel: u8) -> Result<u16, ControllerError>;

    /// Command `targets.len()` consecutive channels starting at `first_channel`
    /// in one transaction.
    fn set_multi_target(
        &mut self,
        first_channel: u8,
        targets: &[u16],
    ) -> Result<(), ControllerError>;
}

// ───────────────────────────────────────────────────────────────
// Trace sink (driven adapter: domain → debug log)
// ───────────────────────────────────────────────────────────────

/// The core emits a [`ServoEvent`] whenever a check fails or a command is
/// clamped, aborted, or refused.  Adapters decide where it goes.
pub trait TraceSink {
    fn emit(&mut self, event: &ServoEvent);
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn emit(&mut self, event: &ServoEvent) {
        (**self).emit(event);
    }
}
