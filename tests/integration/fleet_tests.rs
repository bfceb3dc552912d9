//! Integration tests: fleet dispatcher → single bulk controller call.

use maestro_servo::app::events::ServoEvent;
use maestro_servo::fleet::set_multiple_targets;
use maestro_servo::{ControllerError, ServoConfig, ServoRegistry, ServoUnit};

use super::mock_hw::{ControllerCall, MockController, RecordingSink};

fn units(configs: &[ServoConfig]) -> (MockController, Vec<ServoUnit>, RecordingSink) {
    let ctrl = MockController::new(12);
    let mut reg = ServoRegistry::new(&ctrl);
    let mut sink = RecordingSink::new();
    let units = configs
        .iter()
        .map(|c| ServoUnit::new(c, &mut reg, &mut sink))
        .collect();
    sink.events.clear();
    (ctrl, units, sink)
}

#[test]
fn contiguous_block_is_one_call() {
    let (mut ctrl, units, mut sink) = units(&[
        ServoConfig::for_channel(2),
        ServoConfig::with_angles(0.0, 270.0, 3),
        ServoConfig::new(600, 2400, 0.0, 180.0, 0.0, 180.0, 4),
    ]);

    set_multiple_targets(&units, &[0.0, 90.0, 180.0], &mut ctrl, &mut sink).unwrap();

    let expected: Vec<u16> = vec![
        units[0].degrees_to_pulse(0.0),
        units[1].degrees_to_pulse(90.0),
        units[2].degrees_to_pulse(180.0),
    ];
    assert_eq!(expected, [2000, 4667, 9600]);
    assert_eq!(
        ctrl.calls,
        [ControllerCall::SetMultiTarget {
            first_channel: 2,
            targets: expected
        }]
    );
    assert!(sink.events.is_empty());
}

#[test]
fn gap_is_traced_but_batch_still_sent() {
    let (mut ctrl, units, mut sink) = units(&[
        ServoConfig::for_channel(2),
        ServoConfig::for_channel(4),
        ServoConfig::for_channel(5),
    ]);

    set_multiple_targets(&units, &[0.0, 90.0, 180.0], &mut ctrl, &mut sink).unwrap();

    assert_eq!(ctrl.calls.len(), 1);
    match &ctrl.calls[0] {
        ControllerCall::SetMultiTarget {
            first_channel,
            targets,
        } => {
            assert_eq!(*first_channel, 2);
            assert_eq!(targets.len(), 3);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        sink.events,
        [ServoEvent::ChannelDiscontinuity {
            unit: units[0].id(),
            channel: 2,
            next_channel: 4,
        }]
    );
}

#[test]
fn descending_channels_are_traced() {
    let (mut ctrl, units, mut sink) = units(&[ServoConfig::for_channel(3), ServoConfig::for_channel(2)]);

    set_multiple_targets(&units, &[10.0, 20.0], &mut ctrl, &mut sink).unwrap();

    assert!(matches!(
        sink.events.as_slice(),
        [ServoEvent::ChannelDiscontinuity { channel: 3, next_channel: 2, .. }]
    ));
}

#[test]
fn empty_batch_is_noop() {
    let (mut ctrl, _, mut sink) = units(&[]);
    set_multiple_targets(&[], &[], &mut ctrl, &mut sink).unwrap();
    assert!(ctrl.calls.is_empty());
}

#[test]
fn length_mismatch_uses_shorter_list() {
    let (mut ctrl, units, mut sink) = units(&[
        ServoConfig::for_channel(0),
        ServoConfig::for_channel(1),
        ServoConfig::for_channel(2),
    ]);

    set_multiple_targets(&units, &[90.0, 90.0], &mut ctrl, &mut sink).unwrap();

    assert_eq!(
        ctrl.calls,
        [ControllerCall::SetMultiTarget {
            first_channel: 0,
            targets: vec![6000, 6000]
        }]
    );
    assert!(sink.events.contains(&ServoEvent::BatchLengthMismatch {
        unit: units[0].id(),
        units: 3,
        angles: 2,
    }));
}

#[test]
fn angles_are_clamped_per_unit() {
    let (mut ctrl, units, mut sink) = units(&[
        ServoConfig::new(500, 2500, 0.0, 180.0, 20.0, 160.0, 6),
        ServoConfig::for_channel(7),
    ]);

    set_multiple_targets(&units, &[170.0, 170.0], &mut ctrl, &mut sink).unwrap();

    let ControllerCall::SetMultiTarget { targets, .. } = &ctrl.calls[0] else {
        panic!("expected bulk call");
    };
    assert_eq!(targets[0], units[0].degrees_to_pulse(160.0));
    assert_eq!(targets[1], units[1].degrees_to_pulse(170.0));
    assert!(matches!(
        sink.events.as_slice(),
        [ServoEvent::RotateOver { limit, .. }] if *limit == 160.0
    ));
    // Units are borrowed immutably: no bits are set.
    assert_eq!(units[0].get_error_code(), 0);
}

#[test]
fn negative_base_channel_is_refused() {
    let (mut ctrl, units, mut sink) = units(&[ServoConfig::for_channel(-1), ServoConfig::for_channel(0)]);

    let result = set_multiple_targets(&units, &[0.0, 0.0], &mut ctrl, &mut sink);

    assert_eq!(result, Err(ControllerError::InvalidChannel(0)));
    assert!(ctrl.calls.is_empty());
}

#[test]
fn controller_error_is_returned_and_traced() {
    let (mut ctrl, units, mut sink) = units(&[ServoConfig::for_channel(0), ServoConfig::for_channel(1)]);
    ctrl.fail_with = Some(ControllerError::Unsupported("set multiple targets"));

    let result = set_multiple_targets(&units, &[0.0, 0.0], &mut ctrl, &mut sink);

    assert!(result.is_err());
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, ServoEvent::ControllerFailed { .. })));
}
