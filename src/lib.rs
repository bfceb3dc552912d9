//! Servo calibration and control over a Pololu Maestro.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │   MaestroController   SimController   LogTraceSink        │
//! │   (ControllerPort)    (ControllerPort) (TraceSink)        │
//! │                                                           │
//! │  ─────────────── Port Trait Boundary ───────────────      │
//! │                                                           │
//! │   ServoRegistry ──▶ ServoUnit (calibration · motion)      │
//! │                     fleet::set_multiple_targets           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The firmware builds one [`ServoRegistry`] from its controller, one
//! [`ServoUnit`] per servo, and passes the controller and a trace sink into
//! each call.  Nothing here spawns, blocks on a scheduler, or allocates on
//! the command path.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod calibration;
pub mod config;
pub mod error;
pub mod fleet;
pub mod limits;
pub mod maestro;
pub mod registry;
pub mod servo;

pub use calibration::Calibration;
pub use config::{MaestroConfig, ServoConfig};
pub use error::{ControllerError, FaultMask, ServoFault};
pub use registry::ServoRegistry;
pub use servo::ServoUnit;
