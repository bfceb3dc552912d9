//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements      | Connects to                   |
//! |-------------|-----------------|-------------------------------|
//! | `log_sink`  | TraceSink       | `log` facade (serial console) |
//! | `sim`       | ControllerPort  | In-memory channel table       |
//!
//! The serial Maestro adapter lives in [`crate::maestro`] next to its
//! wire codec.

pub mod log_sink;
pub mod sim;
