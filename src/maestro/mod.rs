//! Pololu Maestro serial servo controller.
//!
//! ```text
//!  ControllerPort ──▶ MaestroController ──▶ codec (frames) ──▶ Transport (UART)
//! ```
//!
//! The Maestro takes targets in quarter-microseconds over a TTL serial
//! link.  Two framings exist: the *compact* protocol (command byte first,
//! one device per line) and the *Pololu* protocol (`0xAA`, device number,
//! command with its top bit cleared) for daisy-chained boards.

use serde::{Deserialize, Serialize};

pub mod codec;
pub mod controller;
pub mod transport;

pub use controller::MaestroController;
pub use transport::{NullTransport, Transport};

/// Serial framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    /// Command byte first; the board answers every compact command.
    Compact,
    /// `0xAA`, device number (0–127), command & 0x7F.
    Pololu { device: u8 },
}

/// Board variants.  The Micro Maestro lacks Set Multiple Targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaestroModel {
    Micro6,
    Mini12,
    Mini18,
    Mini24,
}

impl MaestroModel {
    pub const fn channel_count(self) -> u8 {
        match self {
            Self::Micro6 => 6,
            Self::Mini12 => 12,
            Self::Mini18 => 18,
            Self::Mini24 => 24,
        }
    }

    pub const fn supports_multi_target(self) -> bool {
        !matches!(self, Self::Micro6)
    }
}
