//! # BL0942 Error Handling
//!
//! This module defines the Bl0942Error enum, which represents the different
//! error types that can occur in the bl0942-rs crate. None of the codec or
//! driver variants are fatal: a bad frame or an unready link costs one poll
//! cycle and the next tick retries.

use thiserror::Error;

/// Represents the different error types that can occur in the BL0942 crate.
#[derive(Debug, Error)]
pub enum Bl0942Error {
    /// Indicates an error related to the serial port communication.
    #[error("Serial port error: {0}")]
    SerialPortError(String),

    /// Indicates fewer bytes were available than a full packet requires.
    /// The buffered bytes are kept and the next cycle retries.
    #[error("Incomplete frame: need {needed} bytes, have {available}")]
    IncompleteFrame { needed: usize, available: usize },

    /// Indicates the leading marker byte did not match the packet header.
    /// The caller resynchronizes by discarding a single byte.
    #[error("Malformed header: expected 0x55, found 0x{found:02X}")]
    MalformedHeader { found: u8 },

    /// Indicates a checksum mismatch. The entire frame is discarded and no
    /// field of it is trusted.
    #[error("Checksum mismatch: expected 0x{expected:02X}, calculated 0x{calculated:02X}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// Indicates the transport had nothing buffered this tick.
    #[error("Transport unavailable")]
    TransportUnavailable,

    /// Indicates an invalid device configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Indicates a parser error outside the frame taxonomy.
    #[error("Error parsing BL0942 frame: {0}")]
    FrameParseError(String),
}
