//! Servo and controller configuration.
//!
//! [`ServoConfig`] is the single input to
//! [`ServoUnit::new`](crate::servo::ServoUnit::new).  The named helpers
//! cover the common cases so callers never repeat default values.
//! Values are taken as given; validation happens when a unit is built.

use serde::{Deserialize, Serialize};

use crate::limits::{DEFAULT_MAX_ANGLE, DEFAULT_MAX_US, DEFAULT_MIN_ANGLE, DEFAULT_MIN_US};
use crate::maestro::{MaestroModel, Protocol};

/// Calibration of one physical servo, in manufacturer units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoConfig {
    // --- Pulse width ---
    /// Bottom of the pulse range (µs, unscaled)
    pub pulse_min_us: i32,
    /// Top of the pulse range (µs, unscaled)
    pub pulse_max_us: i32,

    // --- Rated range ---
    /// Manufacturer-rated minimum degree
    pub range_min: f32,
    /// Manufacturer-rated maximum degree
    pub range_max: f32,

    // --- Safe window ---
    /// Experimentally found minimum angle (no jitter)
    pub angle_min: f32,
    /// Experimentally found maximum angle (no jitter)
    pub angle_max: f32,

    /// Controller output the servo is plugged into
    pub channel: i32,
}

impl ServoConfig {
    /// Fully specified calibration.
    pub const fn new(
        pulse_min_us: i32,
        pulse_max_us: i32,
        range_min: f32,
        range_max: f32,
        angle_min: f32,
        angle_max: f32,
        channel: i32,
    ) -> Self {
        Self {
            pulse_min_us,
            pulse_max_us,
            range_min,
            range_max,
            angle_min,
            angle_max,
            channel,
        }
    }

    /// Default pulse range, rated range, and safe window on `channel`.
    pub const fn for_channel(channel: i32) -> Self {
        Self::new(
            DEFAULT_MIN_US,
            DEFAULT_MAX_US,
            DEFAULT_MIN_ANGLE,
            DEFAULT_MAX_ANGLE,
            DEFAULT_MIN_ANGLE,
            DEFAULT_MAX_ANGLE,
            channel,
        )
    }

    /// Default pulse range; the rated range and safe window are both
    /// `min_degrees..=max_degrees`.
    pub const fn with_angles(min_degrees: f32, max_degrees: f32, channel: i32) -> Self {
        Self::new(
            DEFAULT_MIN_US,
            DEFAULT_MAX_US,
            min_degrees,
            max_degrees,
            min_degrees,
            max_degrees,
            channel,
        )
    }
}

/// Settings for the [`MaestroController`](crate::maestro::MaestroController) adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaestroConfig {
    /// Board variant; fixes the channel count and command set
    pub model: MaestroModel,
    /// Serial framing
    pub protocol: Protocol,
    /// Empty reads tolerated while waiting for a position reply
    pub read_attempts: u32,
    /// Sleep between empty reads (microseconds)
    pub poll_interval_us: u32,
}

impl Default for MaestroConfig {
    fn default() -> Self {
        Self {
            model: MaestroModel::Mini12,
            protocol: Protocol::Compact,
            read_attempts: 20,
            poll_interval_us: 500, // 10 ms worst case at 9600 baud
        }
    }
}
