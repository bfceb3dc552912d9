//! Servo registry.
//!
//! Built once by the application from its controller and passed by
//! reference to every [`ServoUnit`](crate::servo::ServoUnit) constructor.
//! It hands out unit ids and carries the controller limits the units
//! validate against.

use log::debug;

use crate::app::ports::ControllerPort;

/// Application-owned source of unit ids and controller limits.
#[derive(Debug)]
pub struct ServoRegistry {
    channel_count: u8,
    pulse_scale: i32,
    /// Id handed to the next unit.
    next_id: u32,
}

impl ServoRegistry {
    /// Capture the limits of `controller`.
    pub fn new(controller: &impl ControllerPort) -> Self {
        Self::with_limits(controller.channel_count(), controller.pulse_scale())
    }

    pub fn with_limits(channel_count: u8, pulse_scale: i32) -> Self {
        debug!(
            "servo registry: {} channels, pulse scale x{}",
            channel_count, pulse_scale
        );
        Self {
            channel_count,
            pulse_scale,
            next_id: 0,
        }
    }

    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    pub fn pulse_scale(&self) -> i32 {
        self.pulse_scale
    }

    /// How many units have been registered so far.
    pub fn units_created(&self) -> u32 {
        self.next_id
    }

    /// Take the next id.  Ids are never reused.
    pub(crate) fn next_unit_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}
