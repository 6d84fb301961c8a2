//! # bl0942-rs - A Rust Driver for the BL0942 Energy Metering IC
//!
//! The bl0942-rs crate provides a Rust driver for the BL0942 single-phase
//! energy metering IC, which reports voltage, current, active power and
//! power factor over a UART link.
//!
//! ## Features
//!
//! - Connect to a BL0942 device using a serial port connection
//! - Poll the device on a fixed schedule and decode its data packets
//! - Validate frame integrity through header and checksum checks, with
//!   per-byte resynchronization on stream corruption
//! - Convert raw register values to physical units with the device scale
//!   constants
//! - Publish converted readings to optional per-quantity sinks
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! To use the bl0942-rs crate in your Rust project, add the following to
//! your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! bl0942-rs = "0.1.0"
//! ```
//!
//! Then, in your Rust code, you can import the necessary modules and
//! functions:
//!
//! ```rust
//! use bl0942_rs::{
//!     connect, Bl0942Config, Bl0942Driver, Bl0942Error,
//!     QuantityKind, Reading, Sink, init_logger, log_info,
//! };
//! ```

pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod logging;
pub mod sensor;
pub mod uart;

pub use crate::error::Bl0942Error;
pub use crate::logging::{init_logger, log_debug, log_error, log_info, log_warn};

// Core driver types
pub use config::{Bl0942Config, SensorConfig};
pub use driver::{Bl0942Driver, PollState, PollStats};
pub use sensor::convert::{convert, Reading};
pub use sensor::registry::{QuantityKind, SensorRegistry, Sink};
pub use uart::frame::{calculate_checksum, decode, pack_frame, Frame};
pub use uart::mock::MockTransport;
pub use uart::transport::{SerialConfig, SerialTransport, Transport};

/// Connect to a BL0942 device via serial port.
///
/// # Arguments
/// * `port` - Serial port path (e.g., "/dev/ttyUSB0" on Linux, "COM3" on Windows)
///
/// # Returns
/// * `Ok(SerialTransport)` - Connected transport for a driver to own
/// * `Err(Bl0942Error)` - Connection failed
pub async fn connect(port: &str) -> Result<SerialTransport, Bl0942Error> {
    SerialTransport::connect(port).await
}
