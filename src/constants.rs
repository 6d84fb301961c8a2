//! BL0942 Protocol Constants
//!
//! This module defines constants used in the BL0942 UART protocol
//! implementation, based on the BL0942 datasheet.

use std::time::Duration;

/// Leading marker byte of every data packet
pub const PACKET_HEADER: u8 = 0x55;

/// Read command byte; also the seed of the checksum sum
pub const READ_COMMAND: u8 = 0x58;

/// Register address requesting the full measurement packet
pub const FULL_PACKET_ADDRESS: u8 = 0xAA;

/// Total length of a data packet, header and checksum included
pub const FRAME_LENGTH: usize = 14;

/// Mask for the 24-bit register values carried in a packet
pub const REGISTER_MASK: u32 = 0x00FF_FFFF;

/// Raw voltage register counts per volt
pub const VOLTAGE_SCALE: f64 = 10_000.0;

/// Raw current register counts per ampere
pub const CURRENT_SCALE: f64 = 1_000.0;

/// Raw power register counts per watt
pub const POWER_SCALE: f64 = 100.0;

/// Raw power-factor register counts per unit power factor
pub const POWER_FACTOR_SCALE: f64 = 1_000.0;

/// UART baud rate the device ships with (8 data bits, no parity, 1 stop bit)
pub const DEFAULT_BAUDRATE: u32 = 4800;

/// Default poll interval
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Upper bound on bytes drained from the transport per poll cycle
pub const MAX_READ_CHUNK: usize = 4 * FRAME_LENGTH;

/// Receive buffer cap; older bytes are dropped past this point
pub const RX_BUFFER_LIMIT: usize = 8 * FRAME_LENGTH;
