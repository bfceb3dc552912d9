//! [`ControllerPort`] implementation for a Maestro on a serial transport.
//!
//! Commands are fire-and-forget writes.  Get Position is the only query:
//! stale input is drained, the query is written, then the transport is
//! polled until the two-byte reply arrives or `read_attempts` empty reads
//! have passed (`ControllerError::Timeout`).

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::ControllerPort;
use crate::config::MaestroConfig;
use crate::error::{ControllerError, Result};
use crate::limits::MAX_TARGET;

use super::codec::{self, PositionDecoder};
use super::transport::Transport;

pub struct MaestroController<T, D> {
    transport: T,
    delay: D,
    config: MaestroConfig,
    decoder: PositionDecoder,
}

impl<T: Transport, D: DelayNs> MaestroController<T, D> {
    pub fn new(transport: T, delay: D, config: MaestroConfig) -> Self {
        debug!(
            "maestro: {:?}, {} channels, {:?} protocol",
            config.model,
            config.model.channel_count(),
            config.protocol
        );
        Self {
            transport,
            delay,
            config,
            decoder: PositionDecoder::new(),
        }
    }

    pub fn config(&self) -> &MaestroConfig {
        &self.config
    }

    /// Give back the transport and delay.
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Reject a block that runs past the last channel.
    fn check_block(&self, first: u8, len: usize) -> Result<()> {
        if usize::from(first) + len > usize::from(self.config.model.channel_count()) {
            return Err(ControllerError::InvalidChannel(first));
        }
        Ok(())
    }

    fn send(&mut self, frame: &[u8]) -> Result<()> {
        let mut sent = 0;
        while sent < frame.len() {
            match self.transport.write(&frame[sent..]) {
                Ok(0) => {
                    warn!("maestro: transport accepted no bytes");
                    return Err(ControllerError::Transport);
                }
                Ok(n) => sent += n,
                Err(e) => {
                    warn!("maestro: write failed: {:?}", e);
                    return Err(ControllerError::Transport);
                }
            }
        }
        self.transport.flush().map_err(|e| {
            warn!("maestro: flush failed: {:?}", e);
            ControllerError::Transport
        })
    }

    fn await_position(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        let mut empty_reads = 0;
        loop {
            let n = self.transport.read(&mut buf).map_err(|e| {
                warn!("maestro: read failed: {:?}", e);
                ControllerError::Transport
            })?;
            if let Some(position) = self.decoder.feed(&buf[..n]) {
                return Ok(position);
            }
            if n == 0 {
                empty_reads += 1;
                if empty_reads >= self.config.read_attempts {
                    warn!("maestro: no position reply after {} polls", empty_reads);
                    return Err(ControllerError::Timeout);
                }
                self.delay.delay_us(self.config.poll_interval_us);
            }
        }
    }
}

impl<T: Transport, D: DelayNs> ControllerPort for MaestroController<T, D> {
    fn channel_count(&self) -> u8 {
        self.config.model.channel_count()
    }

    fn set_target(&mut self, channel: u8, target: u16) -> Result<()> {
        self.check_block(channel, 1)?;
        let frame = codec::encode_set_target(self.config.protocol, channel, target)
            .ok_or(ControllerError::TargetOutOfRange(target))?;
        self.send(&frame)
    }

    fn get_position(&mut self, channel: u8) -> Result<u16> {
        self.check_block(channel, 1)?;
        let frame = codec::encode_get_position(self.config.protocol, channel)
            .ok_or(ControllerError::InvalidChannel(channel))?;

        let stale = self.transport.drain().map_err(|e| {
            warn!("maestro: drain failed: {:?}", e);
            ControllerError::Transport
        })?;
        if stale > 0 {
            debug!("maestro: dropped {} stale bytes", stale);
        }
        self.decoder.reset();

        self.send(&frame)?;
        self.await_position()
    }

    fn set_multi_target(
        &mut self,
        first_channel: u8,
        targets: &[u16],
    ) -> Result<()> {
        if !self.config.model.supports_multi_target() {
            return Err(ControllerError::Unsupported("set multiple targets"));
        }
        if targets.is_empty() {
            return Ok(());
        }
        self.check_block(first_channel, targets.len())?;
        if let Some(&bad) = targets.iter().find(|&&t| t > MAX_TARGET) {
            return Err(ControllerError::TargetOutOfRange(bad));
        }
        let frame = codec::encode_set_multiple_targets(self.config.protocol, first_channel, targets)
            .ok_or(ControllerError::InvalidChannel(first_channel))?;
        self.send(&frame)
    }
}
