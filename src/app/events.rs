//! Trace events emitted by the servo core.
//!
//! Every event names the unit it concerns so a sink can prefix its output
//! (`Servo #3: ...`).  Events are `Copy` and carry no heap data.

use core::fmt;

use crate::error::{ControllerError, ServoFault};

/// The seven construction-time checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCheck {
    MinPulse,
    MaxPulse,
    MinRange,
    MaxRange,
    MinAngle,
    MaxAngle,
    Channel,
}

impl ValidationCheck {
    /// The fault bit a failure of this check sets.  Paired checks share a bit.
    pub const fn fault(self) -> ServoFault {
        match self {
            Self::MinPulse | Self::MaxPulse => ServoFault::PulseWidth,
            Self::MinRange | Self::MaxRange => ServoFault::DegreeRange,
            Self::MinAngle | Self::MaxAngle => ServoFault::Angle,
            Self::Channel => ServoFault::Channel,
        }
    }
}

impl fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinPulse => write!(f, "min pulse"),
            Self::MaxPulse => write!(f, "max pulse"),
            Self::MinRange => write!(f, "min degree range"),
            Self::MaxRange => write!(f, "max degree range"),
            Self::MinAngle => write!(f, "min angle"),
            Self::MaxAngle => write!(f, "max angle"),
            Self::Channel => write!(f, "channel"),
        }
    }
}

/// Structured trace events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServoEvent {
    /// A unit was registered.
    Created { unit: u32, channel: i32 },

    /// A validation check failed.
    CheckFailed { unit: u32, check: ValidationCheck },

    /// A rotate request was above the safe window.
    RotateOver { unit: u32, requested: f32, limit: f32 },

    /// A rotate request was below the safe window.
    RotateUnder { unit: u32, requested: f32, limit: f32 },

    /// `rotate_to_degrees` skipped the controller: bad channel.
    RotateAborted { unit: u32 },

    /// A position read was not attempted: bad channel.
    PositionUnavailable { unit: u32 },

    /// The controller rejected or failed a call for this unit.
    ControllerFailed { unit: u32, error: ControllerError },

    /// Fleet batch: the next unit's channel does not follow this one's.
    ChannelDiscontinuity { unit: u32, channel: i32, next_channel: i32 },

    /// Fleet batch: unit and angle lists differ in length.
    BatchLengthMismatch { unit: u32, units: usize, angles: usize },

    /// Fleet batch: more entries than any controller has channels.
    BatchTruncated { unit: u32, requested: usize, sent: usize },
}

impl ServoEvent {
    /// The unit this event is attributed to.
    pub fn unit(&self) -> u32 {
        match *self {
            Self::Created { unit, .. }
            | Self::CheckFailed { unit, .. }
            | Self::RotateOver { unit, .. }
            | Self::RotateUnder { unit, .. }
            | Self::RotateAborted { unit }
            | Self::PositionUnavailable { unit }
            | Self::ControllerFailed { unit, .. }
            | Self::ChannelDiscontinuity { unit, .. }
            | Self::BatchLengthMismatch { unit, .. }
            | Self::BatchTruncated { unit, .. } => unit,
        }
    }

    /// Whether this event reports something that went wrong (as opposed to
    /// plain bookkeeping such as [`Created`](Self::Created)).
    pub fn is_problem(&self) -> bool {
        !matches!(self, Self::Created { .. })
    }
}

/// Renders the message part of a trace line, without the unit prefix.
impl fmt::Display for ServoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { channel, .. } => write!(f, "created on channel {channel}"),
            Self::CheckFailed { check, .. } => write!(f, "{check} check failed"),
            Self::RotateOver { requested, limit, .. } => write!(
                f,
                "requested rotate to {requested:.1}\u{00b0} exceeds rating, clamped to {limit:.1}\u{00b0}"
            ),
            Self::RotateUnder { requested, limit, .. } => write!(
                f,
                "requested rotate to {requested:.1}\u{00b0} under rating, clamped to {limit:.1}\u{00b0}"
            ),
            Self::RotateAborted { .. } => write!(f, "bad channel, aborting rotate_to_degrees"),
            Self::PositionUnavailable { .. } => {
                write!(f, "bad channel, aborting get_current_degrees")
            }
            Self::ControllerFailed { error, .. } => write!(f, "controller: {error}"),
            Self::ChannelDiscontinuity {
                channel,
                next_channel,
                ..
            } => write!(
                f,
                "channels not contiguous in set_multiple_targets ({channel} -> {next_channel})"
            ),
            Self::BatchLengthMismatch { units, angles, .. } => write!(
                f,
                "set_multiple_targets given {units} servos but {angles} angles"
            ),
            Self::BatchTruncated { requested, sent, .. } => write!(
                f,
                "set_multiple_targets truncated from {requested} to {sent} targets"
            ),
        }
    }
}
