//! Servo unit: one physical actuator on one controller channel.
//!
//! A unit records its calibration once, at construction, and never aborts:
//! bad parameters only set bits in its cumulative [`FaultMask`].  The
//! caller polls the mask with [`ServoUnit::get_error_code`] and resets it
//! with [`ServoUnit::clear_error_code`] between fault episodes.
//!
//! ## Fault lifecycle
//!
//! 1. A check fails or a request is clamped.
//! 2. The matching bit is set in the cumulative mask and a trace is emitted.
//! 3. Motion calls also return the bits raised *by that call*, so a stale
//!    bit from an earlier episode is never mistaken for a fresh one.
//! 4. Bits stay set until `clear_error_code()`.
//!
//! The controller and trace sink are injected into every call that
//! needs them; a unit holds no hardware resource, so dropping it has no
//! effect on the actuator.

use crate::app::events::{ServoEvent, ValidationCheck};
use crate::app::ports::{ControllerPort, TraceSink};
use crate::calibration::{Calibration, Clamped};
use crate::config::ServoConfig;
use crate::error::{FaultMask, ServoFault};
use crate::limits::POSITION_UNAVAILABLE;
use crate::registry::ServoRegistry;

/// One calibrated servo.
#[derive(Debug, Clone)]
pub struct ServoUnit {
    id: u32,
    channel: i32,
    channel_count: u8,
    calibration: Calibration,
    /// Cumulative fault mask.
    faults: FaultMask,
}

impl ServoUnit {
    /// Register a new unit and validate its calibration.
    ///
    /// Always succeeds; inspect [`faults`](Self::faults) afterwards.
    pub fn new(
        config: &ServoConfig,
        registry: &mut ServoRegistry,
        sink: &mut impl TraceSink,
    ) -> Self {
        let mut unit = Self {
            id: registry.next_unit_id(),
            channel: config.channel,
            channel_count: registry.channel_count(),
            calibration: Calibration::from_config(config, registry.pulse_scale()),
            faults: FaultMask::EMPTY,
        };
        sink.emit(&ServoEvent::Created {
            unit: unit.id,
            channel: unit.channel,
        });

        for check in unit.calibration.failed_checks() {
            unit.fail_check(check, sink);
        }
        unit.check_channel(sink);
        unit
    }

    // ── Accessors ─────────────────────────────────────────────

    /// Registry-assigned id, used to tell units apart in traces.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn channel(&self) -> i32 {
        self.channel
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    // ── Fault mask ────────────────────────────────────────────

    /// Raw cumulative fault bits.
    pub fn get_error_code(&self) -> u8 {
        self.faults.bits()
    }

    pub fn faults(&self) -> FaultMask {
        self.faults
    }

    pub fn has_fault(&self, fault: ServoFault) -> bool {
        self.faults.contains(fault)
    }

    /// Reset the cumulative mask to a clean slate.
    pub fn clear_error_code(&mut self) {
        self.faults.clear();
    }

    // ── Conversion ────────────────────────────────────────────

    /// See [`Calibration::degrees_to_pulse`].  Check the mask first on
    /// units built with questionable parameters.
    pub fn degrees_to_pulse(&self, degrees: f32) -> u16 {
        self.calibration.degrees_to_pulse(degrees)
    }

    /// See [`Calibration::pulse_to_degrees`].
    pub fn pulse_to_degrees(&self, pulse: u16) -> f32 {
        self.calibration.pulse_to_degrees(pulse)
    }

    // ── Motion ────────────────────────────────────────────────

    /// Rotate to `degrees`, clamped into the safe window.
    ///
    /// A bad channel aborts without touching the controller; a controller
    /// failure is traced and dropped.  Returns the faults raised by this
    /// call.
    pub fn rotate_to_degrees(
        &mut self,
        degrees: f32,
        controller: &mut impl ControllerPort,
        sink: &mut impl TraceSink,
    ) -> FaultMask {
        let mut raised = FaultMask::EMPTY;

        let target = match self.calibration.clamp(degrees) {
            Clamped::Within(d) => d,
            Clamped::Over(limit) => {
                raised |= ServoFault::RotateOver;
                sink.emit(&ServoEvent::RotateOver {
                    unit: self.id,
                    requested: degrees,
                    limit,
                });
                limit
            }
            Clamped::Under(limit) => {
                raised |= ServoFault::RotateUnder;
                sink.emit(&ServoEvent::RotateUnder {
                    unit: self.id,
                    requested: degrees,
                    limit,
                });
                limit
            }
        };
        self.faults |= raised;

        let Some(channel) = self.check_channel(sink) else {
            sink.emit(&ServoEvent::RotateAborted { unit: self.id });
            return raised | ServoFault::Channel;
        };

        let pulse = self.calibration.degrees_to_pulse(target);
        if let Err(error) = controller.set_target(channel, pulse) {
            sink.emit(&ServoEvent::ControllerFailed {
                unit: self.id,
                error,
            });
        }
        raised
    }

    /// Current angle as reported by the controller.
    ///
    /// `None` when the channel is bad or the controller could not be read;
    /// the two cases are not distinguished.
    pub fn current_degrees(
        &mut self,
        controller: &mut impl ControllerPort,
        sink: &mut impl TraceSink,
    ) -> Option<f32> {
        let Some(channel) = self.check_channel(sink) else {
            sink.emit(&ServoEvent::PositionUnavailable { unit: self.id });
            return None;
        };

        match controller.get_position(channel) {
            Ok(pulse) => Some(self.calibration.pulse_to_degrees(pulse)),
            Err(error) => {
                sink.emit(&ServoEvent::ControllerFailed {
                    unit: self.id,
                    error,
                });
                None
            }
        }
    }

    /// [`current_degrees`](Self::current_degrees) with the
    /// [`POSITION_UNAVAILABLE`] sentinel (`-1.0`) in place of `None`.
    pub fn get_current_degrees(
        &mut self,
        controller: &mut impl ControllerPort,
        sink: &mut impl TraceSink,
    ) -> f32 {
        self.current_degrees(controller, sink)
            .unwrap_or(POSITION_UNAVAILABLE)
    }

    /// Rotate relative to the current position.
    ///
    /// Reads the position first (rounded to a whole degree to damp read
    /// noise), so it is slower than an absolute
    /// [`rotate_to_degrees`](Self::rotate_to_degrees) and fails whenever the
    /// read fails.  Nothing is commanded in that case.
    pub fn rotate_by(
        &mut self,
        delta: f32,
        controller: &mut impl ControllerPort,
        sink: &mut impl TraceSink,
    ) -> FaultMask {
        let Some(current) = self.current_degrees(controller, sink) else {
            return if self.channel_valid() {
                FaultMask::EMPTY
            } else {
                FaultMask::from(ServoFault::Channel)
            };
        };
        self.rotate_to_degrees(current.round() + delta, controller, sink)
    }

    // ── Internal ──────────────────────────────────────────────

    fn channel_valid(&self) -> bool {
        self.channel >= 0 && self.channel < i32::from(self.channel_count)
    }

    /// Re-run the channel check.  Returns the bus address when valid;
    /// otherwise sets the channel bit.
    fn check_channel(&mut self, sink: &mut impl TraceSink) -> Option<u8> {
        if self.channel_valid() {
            u8::try_from(self.channel).ok()
        } else {
            self.fail_check(ValidationCheck::Channel, sink);
            None
        }
    }

    fn fail_check(&mut self, check: ValidationCheck, sink: &mut impl TraceSink) {
        self.faults |= check.fault();
        sink.emit(&ServoEvent::CheckFailed {
            unit: self.id,
            check,
        });
    }
}
