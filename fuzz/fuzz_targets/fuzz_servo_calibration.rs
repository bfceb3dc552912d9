//! Fuzz target: `ServoUnit` construction and motion
//!
//! Builds a unit from arbitrary calibration values and drives it with an
//! arbitrary angle through the simulated controller.  Asserts:
//! - Construction and rotation never panic, whatever the floats are
//! - A unit that passed every check only ever commands inside its window
//!
//! cargo fuzz run fuzz_servo_calibration

#![no_main]

use libfuzzer_sys::fuzz_target;
use maestro_servo::adapters::log_sink::NullTraceSink;
use maestro_servo::adapters::sim::SimController;
use maestro_servo::{ServoConfig, ServoRegistry, ServoUnit};

fn f32_at(data: &[u8], at: usize) -> f32 {
    data.get(at..at + 4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .unwrap_or(0.0)
}

fn i32_at(data: &[u8], at: usize) -> i32 {
    data.get(at..at + 4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .unwrap_or(0)
}

fuzz_target!(|data: &[u8]| {
    let config = ServoConfig::new(
        i32_at(data, 0),
        i32_at(data, 4),
        f32_at(data, 8),
        f32_at(data, 12),
        f32_at(data, 16),
        f32_at(data, 20),
        i32_at(data, 24),
    );
    let request = f32_at(data, 28);

    let mut ctrl = SimController::new(12);
    let mut registry = ServoRegistry::new(&ctrl);
    let mut sink = NullTraceSink;
    let mut unit = ServoUnit::new(&config, &mut registry, &mut sink);
    let clean = unit.faults().is_empty();

    let _ = unit.rotate_to_degrees(request, &mut ctrl, &mut sink);
    let _ = unit.rotate_by(request, &mut ctrl, &mut sink);

    if clean {
        let cal = *unit.calibration();
        let (lo, hi) = cal.angle_window();
        let ch = unit.channel() as u8;
        if let Some(sent) = ctrl.position(ch) {
            assert!(sent >= cal.degrees_to_pulse(lo));
            assert!(sent <= cal.degrees_to_pulse(hi));
        }
    }
});
