//! Fuzz target: `PositionDecoder::feed` and the command encoders
//!
//! Splits arbitrary input into read-sized chunks and feeds them to the
//! position decoder, then encodes commands from the same bytes.  Asserts:
//! - The decoder yields exactly the first two bytes, however they are split
//! - Every encoded frame fits `MAX_FRAME_SIZE` and carries 7-bit data bytes
//!
//! cargo fuzz run fuzz_position_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use maestro_servo::maestro::Protocol;
use maestro_servo::maestro::codec::{
    MAX_FRAME_SIZE, PositionDecoder, encode_get_position, encode_set_multiple_targets,
    encode_set_target,
};

fuzz_target!(|data: &[u8]| {
    let Some((&chunk, rest)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(chunk % 3) + 1;

    let mut decoder = PositionDecoder::new();
    let mut decoded = None;
    for piece in rest.chunks(chunk) {
        if let Some(position) = decoder.feed(piece) {
            decoded.get_or_insert(position);
        }
    }
    match rest {
        [lo, hi, ..] => assert_eq!(decoded, Some(u16::from_le_bytes([*lo, *hi]))),
        _ => assert_eq!(decoded, None),
    }
    decoder.reset();
    let _ = decoder.feed(rest);

    let protocol = match rest.first() {
        Some(&device) if device & 0x80 != 0 => Protocol::Pololu { device: device & 0x7F },
        _ => Protocol::Compact,
    };
    let targets: Vec<u16> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let channel = rest.get(1).copied().unwrap_or(0);

    let frames = [
        encode_get_position(protocol, channel),
        targets
            .first()
            .and_then(|&t| encode_set_target(protocol, channel, t)),
        encode_set_multiple_targets(protocol, channel, &targets),
    ];
    for frame in frames.iter().flatten() {
        assert!(frame.len() <= MAX_FRAME_SIZE);
        // Only the leading command or 0xAA start byte has its top bit set.
        assert!(frame[1..].iter().all(|b| *b <= 0x7F));
    }
});
