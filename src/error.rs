//! Fault and error types for the servo layer.
//!
//! Two different things live here:
//!
//! - [`ServoFault`] / [`FaultMask`]: calibration and motion faults that are
//!   *recorded* on a [`ServoUnit`](crate::servo::ServoUnit) and never abort
//!   anything.  The caller polls them.
//! - [`ControllerError`]: a typed failure from a
//!   [`ControllerPort`](crate::app::ports::ControllerPort) call.
//!
//! All types are `Copy` so they can be passed through trace events and
//! per-call status values without allocation.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

// ---------------------------------------------------------------------------
// Servo faults
// ---------------------------------------------------------------------------

/// A single fault bit.  Faults are accumulated in a [`FaultMask`] so that
/// several can be present at once; no two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServoFault {
    /// Pulse-width bounds are negative or not strictly ordered.
    PulseWidth = 0b0000_0001,
    /// Rated degree range is negative, inverted, or exceeds 360°.
    DegreeRange = 0b0000_0010,
    /// Safe-angle window is inverted or leaves the rated range.
    Angle = 0b0000_0100,
    /// Channel index is outside the controller's channel span.
    Channel = 0b0000_1000,
    /// A rotate request was below the safe window and was clamped up.
    RotateUnder = 0b0001_0000,
    /// A rotate request was above the safe window and was clamped down.
    RotateOver = 0b0010_0000,
}

impl ServoFault {
    /// Every fault, in bit order.
    pub const ALL: [Self; 6] = [
        Self::PulseWidth,
        Self::DegreeRange,
        Self::Angle,
        Self::Channel,
        Self::RotateUnder,
        Self::RotateOver,
    ];

    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ServoFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PulseWidth => write!(f, "pulse width"),
            Self::DegreeRange => write!(f, "degree range"),
            Self::Angle => write!(f, "angle"),
            Self::Channel => write!(f, "channel"),
            Self::RotateUnder => write!(f, "rotate under"),
            Self::RotateOver => write!(f, "rotate over"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fault mask
// ---------------------------------------------------------------------------

/// A set of [`ServoFault`]s packed into one byte.
///
/// Used both for a unit's cumulative mask and for the fresh per-call
/// status returned by motion operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FaultMask(u8);

impl FaultMask {
    /// No faults.
    pub const EMPTY: Self = Self(0);

    /// Build a mask from raw bits.  Bits with no matching fault are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        let mut known = 0;
        let mut i = 0;
        while i < ServoFault::ALL.len() {
            known |= ServoFault::ALL[i].mask();
            i += 1;
        }
        Self(bits & known)
    }

    /// Raw bit representation (the classic "error code").
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, fault: ServoFault) -> bool {
        self.0 & fault.mask() != 0
    }

    pub fn insert(&mut self, fault: ServoFault) {
        self.0 |= fault.mask();
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate over the faults present, in bit order.
    pub fn iter(self) -> impl Iterator<Item = ServoFault> {
        ServoFault::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl From<ServoFault> for FaultMask {
    fn from(fault: ServoFault) -> Self {
        Self(fault.mask())
    }
}

impl BitOr for FaultMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<ServoFault> for FaultMask {
    type Output = Self;

    fn bitor(self, rhs: ServoFault) -> Self {
        Self(self.0 | rhs.mask())
    }
}

impl BitOrAssign for FaultMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<ServoFault> for FaultMask {
    fn bitor_assign(&mut self, rhs: ServoFault) {
        self.insert(rhs);
    }
}

impl fmt::Display for FaultMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for (i, fault) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{fault}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Controller errors
// ---------------------------------------------------------------------------

/// Failure reported by a controller gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// The byte transport refused a read or write.
    Transport,
    /// The controller did not answer a query in time.
    Timeout,
    /// Channel (or channel block) is not addressable on this controller.
    InvalidChannel(u8),
    /// Target does not fit the controller's 14-bit target field.
    TargetOutOfRange(u16),
    /// The command is not available on this controller model.
    Unsupported(&'static str),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "transport error"),
            Self::Timeout => write!(f, "controller timed out"),
            Self::InvalidChannel(ch) => write!(f, "invalid channel {ch}"),
            Self::TargetOutOfRange(t) => write!(f, "target {t} out of range"),
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Result of a controller operation.
pub type Result<T> = core::result::Result<T, ControllerError>;
