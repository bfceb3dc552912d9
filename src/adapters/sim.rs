//! Simulated servo controller.
//!
//! In-memory [`ControllerPort`]: a commanded target becomes the reported
//! position immediately.  Used on the host where no Maestro is attached.

use log::debug;

use crate::app::ports::ControllerPort;
use crate::error::ControllerError;
use crate::limits::{MAX_CHANNELS, MAX_TARGET};

pub struct SimController {
    channel_count: u8,
    /// Last commanded target per channel; `None` until first commanded.
    positions: [Option<u16>; MAX_CHANNELS],
    commands: u32,
}

impl SimController {
    /// `channel_count` is capped at [`MAX_CHANNELS`].
    pub fn new(channel_count: u8) -> Self {
        Self {
            channel_count: channel_count.min(MAX_CHANNELS as u8),
            positions: [None; MAX_CHANNELS],
            commands: 0,
        }
    }

    /// Last target commanded on `channel`.
    pub fn position(&self, channel: u8) -> Option<u16> {
        self.positions.get(usize::from(channel)).copied().flatten()
    }

    /// Number of accepted `set_target` / `set_multi_target` calls.
    pub fn command_count(&self) -> u32 {
        self.commands
    }

    fn check(&self, first: u8, len: usize) -> Result<(), ControllerError> {
        if usize::from(first) + len > usize::from(self.channel_count) {
            return Err(ControllerError::InvalidChannel(first));
        }
        Ok(())
    }
}

impl ControllerPort for SimController {
    fn channel_count(&self) -> u8 {
        self.channel_count
    }

    fn set_target(&mut self, channel: u8, target: u16) -> Result<(), ControllerError> {
        self.check(channel, 1)?;
        if target > MAX_TARGET {
            return Err(ControllerError::TargetOutOfRange(target));
        }
        debug!("sim: ch{} -> {}", channel, target);
        self.positions[usize::from(channel)] = Some(target);
        self.commands += 1;
        Ok(())
    }

    fn get_position(&mut self, channel: u8) -> Result<u16, ControllerError> {
        self.check(channel, 1)?;
        // A channel that was never commanded reports 0, like the hardware.
        Ok(self.positions[usize::from(channel)].unwrap_or(0))
    }

    fn set_multi_target(
        &mut self,
        first_channel: u8,
        targets: &[u16],
    ) -> Result<(), ControllerError> {
        self.check(first_channel, targets.len())?;
        if let Some(&bad) = targets.iter().find(|&&t| t > MAX_TARGET) {
            return Err(ControllerError::TargetOutOfRange(bad));
        }
        let first = usize::from(first_channel);
        for (slot, &t) in self.positions[first..first + targets.len()]
            .iter_mut()
            .zip(targets)
        {
            *slot = Some(t);
        }
        self.commands += 1;
        Ok(())
    }
}
