//! Fleet dispatcher: synchronized targets for a contiguous channel block.
//!
//! [`set_multiple_targets`] converts one angle per unit through that unit's
//! own calibration and sends the whole block to the controller in a single
//! transaction, so every servo starts moving at the same instant.
//!
//! The controller addresses the block as `first_channel..first_channel + n`.
//! Units are expected to sit on consecutive ascending channels; a gap is
//! traced on the unit before it but not corrected.

use heapless::Vec;

use crate::app::events::{ServoEvent, ValidationCheck};
use crate::app::ports::{ControllerPort, TraceSink};
use crate::calibration::Clamped;
use crate::error::{ControllerError, Result};
use crate::limits::MAX_CHANNELS;
use crate::servo::ServoUnit;

/// Send `angles[i]` to `units[i]` in one controller call.
///
/// - Mismatched lengths are traced and the shorter length is used.
/// - An empty batch is a no-op.
/// - Each angle is clamped into its unit's safe window (traced; the units
///   are borrowed immutably, so no fault bits are set).  Batch moves are
///   deliberately held to the same window as
///   [`ServoUnit::rotate_to_degrees`] rather than sent raw.
/// - The first unit's channel is the base of the block.
pub fn set_multiple_targets(
    units: &[ServoUnit],
    angles: &[f32],
    controller: &mut impl ControllerPort,
    sink: &mut impl TraceSink,
) -> Result<()> {
    let Some(first) = units.first() else {
        return Ok(());
    };

    if units.len() != angles.len() {
        sink.emit(&ServoEvent::BatchLengthMismatch {
            unit: first.id(),
            units: units.len(),
            angles: angles.len(),
        });
    }

    for pair in units.windows(2) {
        let (this, next) = (&pair[0], &pair[1]);
        if this.channel().checked_add(1) != Some(next.channel()) {
            sink.emit(&ServoEvent::ChannelDiscontinuity {
                unit: this.id(),
                channel: this.channel(),
                next_channel: next.channel(),
            });
        }
    }

    let requested = units.len().min(angles.len());
    let mut pulses: Vec<u16, MAX_CHANNELS> = Vec::new();
    for (unit, &angle) in units.iter().zip(angles).take(MAX_CHANNELS) {
        let target = match unit.calibration().clamp(angle) {
            Clamped::Within(d) => d,
            Clamped::Over(limit) => {
                sink.emit(&ServoEvent::RotateOver {
                    unit: unit.id(),
                    requested: angle,
                    limit,
                });
                limit
            }
            Clamped::Under(limit) => {
                sink.emit(&ServoEvent::RotateUnder {
                    unit: unit.id(),
                    requested: angle,
                    limit,
                });
                limit
            }
        };
        // `take(MAX_CHANNELS)` keeps this within capacity.
        let _ = pulses.push(unit.degrees_to_pulse(target));
    }
    if pulses.len() < requested {
        sink.emit(&ServoEvent::BatchTruncated {
            unit: first.id(),
            requested,
            sent: pulses.len(),
        });
    }
    if pulses.is_empty() {
        return Ok(());
    }

    let Ok(first_channel) = u8::try_from(first.channel()) else {
        sink.emit(&ServoEvent::CheckFailed {
            unit: first.id(),
            check: ValidationCheck::Channel,
        });
        return Err(ControllerError::InvalidChannel(
            first.channel().clamp(0, i32::from(u8::MAX)) as u8,
        ));
    };

    controller
        .set_multi_target(first_channel, &pulses)
        .inspect_err(|&error| {
            sink.emit(&ServoEvent::ControllerFailed {
                unit: first.id(),
                error,
            });
        })
}
