//! Calibration model: degrees ⇄ native pulse units, plus range checks.
//!
//! ```text
//!  0°        range_min                         range_max   (rated, degrees)
//!  │            │   angle_min ──── angle_max      │         (safe window)
//!  ▼            ▼                                 ▼
//!  pulse_min ──────────────────────────────── pulse_max    (native units)
//! ```
//!
//! The line is anchored at 0° and sloped by `range_max`, so `range_min`
//! only bounds the safe window and never shifts a pulse.  Tightening the
//! window never moves where a given angle lands.

use heapless::Vec;

use crate::app::events::ValidationCheck;
use crate::config::ServoConfig;
use crate::limits::{MAX_DEGREES, MAX_TARGET};

/// Immutable calibration of one servo, pulse values already scaled to
/// controller units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pulse_min: i32,
    pulse_max: i32,
    range_min: f32,
    range_max: f32,
    angle_min: f32,
    angle_max: f32,
}

/// Outcome of fitting a requested angle into the safe window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clamped {
    Within(f32),
    /// Request was above `angle_max`; carries `angle_max`.
    Over(f32),
    /// Request was below `angle_min` (or NaN); carries `angle_min`.
    Under(f32),
}

impl Clamped {
    pub fn degrees(self) -> f32 {
        match self {
            Self::Within(d) | Self::Over(d) | Self::Under(d) => d,
        }
    }
}

impl Calibration {
    /// Scale the config's microsecond values by `pulse_scale`.
    pub fn from_config(config: &ServoConfig, pulse_scale: i32) -> Self {
        Self {
            pulse_min: config.pulse_min_us.saturating_mul(pulse_scale),
            pulse_max: config.pulse_max_us.saturating_mul(pulse_scale),
            range_min: config.range_min,
            range_max: config.range_max,
            angle_min: config.angle_min,
            angle_max: config.angle_max,
        }
    }

    pub fn pulse_min(&self) -> i32 {
        self.pulse_min
    }

    pub fn pulse_max(&self) -> i32 {
        self.pulse_max
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }

    pub fn angle_window(&self) -> (f32, f32) {
        (self.angle_min, self.angle_max)
    }

    // ── Validation ────────────────────────────────────────────

    /// Run the six calibration checks and return the ones that failed, in
    /// check order.  Each check is independent of the others.
    pub fn failed_checks(&self) -> Vec<ValidationCheck, 6> {
        let mut failed = Vec::new();
        let checks = [
            (ValidationCheck::MinPulse, self.min_pulse_bad()),
            (ValidationCheck::MaxPulse, self.max_pulse_bad()),
            (ValidationCheck::MinRange, self.min_range_bad()),
            (ValidationCheck::MaxRange, self.max_range_bad()),
            (ValidationCheck::MinAngle, self.min_angle_bad()),
            (ValidationCheck::MaxAngle, self.max_angle_bad()),
        ];
        for (check, bad) in checks {
            if bad {
                // Capacity equals the number of checks.
                let _ = failed.push(check);
            }
        }
        failed
    }

    fn min_pulse_bad(&self) -> bool {
        self.pulse_min < 0 || self.pulse_min > self.pulse_max
    }

    /// Also fails when the scaled maximum does not fit a 14-bit target.
    fn max_pulse_bad(&self) -> bool {
        self.pulse_max < 0
            || self.pulse_max <= self.pulse_min
            || self.pulse_max > i32::from(MAX_TARGET)
    }

    fn min_range_bad(&self) -> bool {
        !self.range_min.is_finite() || self.range_min < 0.0 || self.range_min > self.range_max
    }

    fn max_range_bad(&self) -> bool {
        !self.range_max.is_finite()
            || self.range_max > MAX_DEGREES
            || self.range_max < self.range_min
    }

    fn min_angle_bad(&self) -> bool {
        !self.angle_min.is_finite()
            || self.angle_min < 0.0
            || self.angle_min > self.angle_max
            || self.angle_min < self.range_min
    }

    fn max_angle_bad(&self) -> bool {
        !self.angle_max.is_finite()
            || self.angle_max < 0.0
            || self.angle_max < self.angle_min
            || self.angle_max > self.range_max
    }

    // ── Conversion ────────────────────────────────────────────

    /// Angle to native pulse units, rounded to the nearest unit.
    ///
    /// `pulse_min` is 0° and `pulse_max` is `range_max`.  Only meaningful
    /// when the pulse and range checks passed (`pulse_min < pulse_max`,
    /// `range_max > 0`).
    pub fn degrees_to_pulse(&self, degrees: f32) -> u16 {
        let span = (self.pulse_max - self.pulse_min) as f32;
        let pulse = span / self.range_max * degrees + self.pulse_min as f32;
        // Float-to-int `as` saturates, so out-of-domain input pins to 0 or u16::MAX.
        pulse.round() as u16
    }

    /// Native pulse units to angle.  Inverse of [`degrees_to_pulse`](Self::degrees_to_pulse).
    pub fn pulse_to_degrees(&self, pulse: u16) -> f32 {
        let span = (self.pulse_max - self.pulse_min) as f32;
        self.range_max / span * (f32::from(pulse) - self.pulse_min as f32)
    }

    // ── Motion limits ─────────────────────────────────────────

    /// Fit `degrees` into `[angle_min, angle_max]`.
    pub fn clamp(&self, degrees: f32) -> Clamped {
        if degrees > self.angle_max {
            Clamped::Over(self.angle_max)
        } else if degrees < self.angle_min || degrees.is_nan() {
            Clamped::Under(self.angle_min)
        } else {
            Clamped::Within(degrees)
        }
    }
}
