//! Maestro command codec.
//!
//! Wire format (compact protocol):
//! ```text
//! Set Target            0x84  channel  target&0x7F  (target>>7)&0x7F
//! Get Position          0x90  channel                 ──▶ reply: lo  hi
//! Set Multiple Targets  0x9F  count  first  (lo7 hi7) × count
//! ```
//!
//! The Pololu protocol prefixes `0xAA, device` and clears the command's
//! top bit (`0x84` → `0x04`).  Every byte after the command is a 7-bit data
//! byte, which is why targets are split into two 7-bit halves.  The
//! position reply is the exception: two plain bytes, little-endian.

use heapless::Vec;

use crate::limits::{MAX_CHANNELS, MAX_TARGET};

use super::Protocol;

pub const CMD_SET_TARGET: u8 = 0x84;
pub const CMD_GET_POSITION: u8 = 0x90;
pub const CMD_SET_MULTIPLE_TARGETS: u8 = 0x9F;

/// First byte of a Pololu-protocol frame.
pub const POLOLU_START: u8 = 0xAA;

/// Largest data byte value.
const DATA_MAX: u8 = 0x7F;

/// Worst case: Pololu header (3) + count + first + two bytes per channel.
pub const MAX_FRAME_SIZE: usize = 5 + 2 * MAX_CHANNELS;

/// Position reply size.
const REPLY_SIZE: usize = 2;

/// One encoded command.
pub type Frame = Vec<u8, MAX_FRAME_SIZE>;

/// Set Target for one channel.
///
/// `None` when the channel or target does not fit in data bytes.
pub fn encode_set_target(protocol: Protocol, channel: u8, target: u16) -> Option<Frame> {
    if channel > DATA_MAX || target > MAX_TARGET {
        return None;
    }
    let mut frame = header(protocol, CMD_SET_TARGET)?;
    frame.push(channel).ok()?;
    push_target(&mut frame, target)?;
    Some(frame)
}

/// Get Position query.  The board answers with two bytes, see
/// [`PositionDecoder`].
pub fn encode_get_position(protocol: Protocol, channel: u8) -> Option<Frame> {
    if channel > DATA_MAX {
        return None;
    }
    let mut frame = header(protocol, CMD_GET_POSITION)?;
    frame.push(channel).ok()?;
    Some(frame)
}

/// Set Multiple Targets for `targets.len()` channels starting at `first_channel`.
///
/// `None` for an empty or oversized block, or any target over 14 bits.
pub fn encode_set_multiple_targets(
    protocol: Protocol,
    first_channel: u8,
    targets: &[u16],
) -> Option<Frame> {
    if targets.is_empty()
        || targets.len() > MAX_CHANNELS
        || usize::from(first_channel) + targets.len() > usize::from(DATA_MAX) + 1
    {
        return None;
    }
    let mut frame = header(protocol, CMD_SET_MULTIPLE_TARGETS)?;
    frame.push(targets.len() as u8).ok()?;
    frame.push(first_channel).ok()?;
    for &target in targets {
        if target > MAX_TARGET {
            return None;
        }
        push_target(&mut frame, target)?;
    }
    Some(frame)
}

fn header(protocol: Protocol, command: u8) -> Option<Frame> {
    let mut frame = Frame::new();
    match protocol {
        Protocol::Compact => frame.push(command).ok()?,
        Protocol::Pololu { device } => {
            if device > DATA_MAX {
                return None;
            }
            frame
                .extend_from_slice(&[POLOLU_START, device, command & DATA_MAX])
                .ok()?;
        }
    }
    Some(frame)
}

fn push_target(frame: &mut Frame, target: u16) -> Option<()> {
    let lo = (target & u16::from(DATA_MAX)) as u8;
    let hi = ((target >> 7) & u16::from(DATA_MAX)) as u8;
    frame.extend_from_slice(&[lo, hi]).ok()
}

/// Streaming decoder for the two-byte Get Position reply.
///
/// A single `Transport::read` may return one byte or both; the decoder
/// accumulates until the reply is complete.
#[derive(Debug, Default)]
pub struct PositionDecoder {
    buf: [u8; REPLY_SIZE],
    collected: usize,
}

impl PositionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the decoder.
    ///
    /// Returns the position once both bytes have arrived.  Bytes past the
    /// reply are ignored; call [`reset`](Self::reset) before the next query.
    pub fn feed(&mut self, data: &[u8]) -> Option<u16> {
        if self.collected == REPLY_SIZE {
            return Some(u16::from_le_bytes(self.buf));
        }
        let to_copy = (REPLY_SIZE - self.collected).min(data.len());
        self.buf[self.collected..self.collected + to_copy].copy_from_slice(&data[..to_copy]);
        self.collected += to_copy;

        (self.collected == REPLY_SIZE).then_some(u16::from_le_bytes(self.buf))
    }

    /// Forget any partial reply.
    pub fn reset(&mut self) {
        self.collected = 0;
    }
}
