//! Mock hardware adapters for integration tests.
//!
//! Records every controller call and trace event so tests can assert on
//! the full history without a Maestro on the bench.

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use maestro_servo::ControllerError;
use maestro_servo::app::events::ServoEvent;
use maestro_servo::app::ports::{ControllerPort, TraceSink};
use maestro_servo::maestro::Transport;

// ── Controller call record ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerCall {
    SetTarget { channel: u8, target: u16 },
    GetPosition { channel: u8 },
    SetMultiTarget { first_channel: u8, targets: Vec<u16> },
}

// ── MockController ────────────────────────────────────────────

pub struct MockController {
    pub channel_count: u8,
    pub calls: Vec<ControllerCall>,
    /// Positions reported by `get_position`; unset channels report 0.
    pub positions: HashMap<u8, u16>,
    /// When set, every call fails with this error (after being recorded).
    pub fail_with: Option<ControllerError>,
}

#[allow(dead_code)]
impl MockController {
    pub fn new(channel_count: u8) -> Self {
        Self {
            channel_count,
            calls: Vec::new(),
            positions: HashMap::new(),
            fail_with: None,
        }
    }

    pub fn last_call(&self) -> Option<&ControllerCall> {
        self.calls.last()
    }

    pub fn set_target_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ControllerCall::SetTarget { .. }))
            .count()
    }
}

impl ControllerPort for MockController {
    fn channel_count(&self) -> u8 {
        self.channel_count
    }

    fn set_target(&mut self, channel: u8, target: u16) -> Result<(), ControllerError> {
        self.calls.push(ControllerCall::SetTarget { channel, target });
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.positions.insert(channel, target);
        Ok(())
    }

    fn get_position(&mut self, channel: u8) -> Result<u16, ControllerError> {
        self.calls.push(ControllerCall::GetPosition { channel });
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        Ok(self.positions.get(&channel).copied().unwrap_or(0))
    }

    fn set_multi_target(
        &mut self,
        first_channel: u8,
        targets: &[u16],
    ) -> Result<(), ControllerError> {
        self.calls.push(ControllerCall::SetMultiTarget {
            first_channel,
            targets: targets.to_vec(),
        });
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ServoEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events other than `Created`.
    pub fn problems(&self) -> Vec<ServoEvent> {
        self.events.iter().copied().filter(ServoEvent::is_problem).collect()
    }
}

impl TraceSink for RecordingSink {
    fn emit(&mut self, event: &ServoEvent) {
        self.events.push(*event);
    }
}

// ── MockSerial ────────────────────────────────────────────────

/// Loopback-style serial port: records writes, serves queued reply bytes
/// at most `chunk` bytes per read.
pub struct MockSerial {
    pub written: Vec<u8>,
    pub rx: VecDeque<u8>,
    pub chunk: usize,
    /// Reply queued into `rx` after the next write.
    pub reply: Vec<u8>,
    pub write_fails: bool,
}

#[allow(dead_code)]
impl MockSerial {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            rx: VecDeque::new(),
            chunk: usize::MAX,
            reply: Vec::new(),
            write_fails: false,
        }
    }
}

impl Transport for MockSerial {
    type Error = &'static str;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.chunk).min(self.rx.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.rx.pop_front().unwrap_or(0);
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if self.write_fails {
            return Err("line down");
        }
        self.written.extend_from_slice(data);
        self.rx.extend(self.reply.drain(..));
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

// ── MockDelay ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}
