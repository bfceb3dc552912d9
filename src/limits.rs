//! Default calibration values and controller limits.
//!
//! Single source of truth: configs, validation, and the Maestro adapter
//! all reference this module rather than hard-coding numbers.

// ---------------------------------------------------------------------------
// Default calibration (HS-422 class hobby servo)
// ---------------------------------------------------------------------------

/// Manufacturer minimum pulse width in microseconds.
pub const DEFAULT_MIN_US: i32 = 500;
/// Manufacturer maximum pulse width in microseconds.
pub const DEFAULT_MAX_US: i32 = 2500;

/// Default lower bound of both the rated range and the safe window.
pub const DEFAULT_MIN_ANGLE: f32 = 0.0;
/// Default upper bound of both the rated range and the safe window.
pub const DEFAULT_MAX_ANGLE: f32 = 180.0;

/// No rated range may exceed a full turn.
pub const MAX_DEGREES: f32 = 360.0;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The Maestro works in quarter-microseconds: 1500 µs is sent as 6000.
pub const MAESTRO_PULSE_SCALE: i32 = 4;

/// Channel count of the largest supported controller (Mini Maestro 24).
/// Sizes every fixed-capacity batch buffer.
pub const MAX_CHANNELS: usize = 24;

/// Targets travel as two 7-bit bytes.
pub const MAX_TARGET: u16 = 0x3FFF;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returned by [`ServoUnit::get_current_degrees`](crate::servo::ServoUnit::get_current_degrees)
/// when the position cannot be read.  Outside every legal angle.
pub const POSITION_UNAVAILABLE: f32 = -1.0;
