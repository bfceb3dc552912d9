//! Application boundary: port traits and the events that cross them.
//!
//! The servo core ([`servo`](crate::servo), [`fleet`](crate::fleet)) never
//! touches the serial bus or a log backend directly.  All interaction with
//! the outside world happens through the **port traits** defined in
//! [`ports`], keeping the core fully testable without real hardware.

pub mod events;
pub mod ports;
