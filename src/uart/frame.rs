//! # BL0942 Packet Decoder
//!
//! This module provides functionality to decode and pack BL0942 data packets,
//! the fixed-length frames the metering IC emits over its UART link. It
//! leverages the `nom` crate for parsing the register fields.
//!
//! ## Features
//! - Decode the 14-byte data packet into raw register values.
//! - Verify frame integrity through checksum validation.
//! - Pack frames back into bytes for tests and mock transports.
//!
//! ## Usage
//!
//! Decoding a packet from a byte slice:
//! ```ignore
//! let bytes: &[u8] = &[
//!     // 14 packet bytes read from the UART
//! ];
//! match decode(bytes) {
//!     Ok(frame) => {
//!         // Raw registers are trustworthy; checksum already verified
//!     }
//!     Err(error) => {
//!         // IncompleteFrame, MalformedHeader or ChecksumMismatch
//!     }
//! }
//! ```
//!
//! ## Error Handling
//! Decoding never trusts a partial packet: a short buffer yields
//! `IncompleteFrame` before any other check, a wrong leading byte yields
//! `MalformedHeader`, and a checksum failure discards the whole frame.

use crate::constants::{FRAME_LENGTH, PACKET_HEADER, READ_COMMAND, REGISTER_MASK};
use crate::error::Bl0942Error;
use nom::number::complete::le_u24;
use nom::IResult;

/// Represents a decoded BL0942 data packet: the four raw 24-bit registers
/// plus the trailing checksum byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub voltage_raw: u32,
    pub current_raw: u32,
    pub power_raw: u32,
    pub power_factor_raw: u32,
    pub checksum: u8,
}

impl Frame {
    /// Builds a frame from register values, computing the checksum the
    /// device would transmit. Register values are masked to 24 bits.
    pub fn from_registers(voltage: u32, current: u32, power: u32, power_factor: u32) -> Self {
        let mut frame = Frame {
            voltage_raw: voltage & REGISTER_MASK,
            current_raw: current & REGISTER_MASK,
            power_raw: power & REGISTER_MASK,
            power_factor_raw: power_factor & REGISTER_MASK,
            checksum: 0,
        };
        let bytes = pack_frame(&frame);
        frame.checksum = calculate_checksum(&bytes[..FRAME_LENGTH - 1]);
        frame
    }
}

/// Decodes a BL0942 data packet from the start of the input buffer.
///
/// The length check comes first so that every buffer shorter than a full
/// packet yields `IncompleteFrame`, whatever its content; callers keep their
/// bytes and retry once more have arrived.
pub fn decode(input: &[u8]) -> Result<Frame, Bl0942Error> {
    if input.len() < FRAME_LENGTH {
        return Err(Bl0942Error::IncompleteFrame {
            needed: FRAME_LENGTH,
            available: input.len(),
        });
    }
    if input[0] != PACKET_HEADER {
        return Err(Bl0942Error::MalformedHeader { found: input[0] });
    }

    let expected = input[FRAME_LENGTH - 1];
    let calculated = calculate_checksum(&input[..FRAME_LENGTH - 1]);
    if expected != calculated {
        return Err(Bl0942Error::ChecksumMismatch {
            expected,
            calculated,
        });
    }

    let (_, (voltage_raw, current_raw, power_raw, power_factor_raw)) =
        parse_registers(&input[1..FRAME_LENGTH - 1])
            .map_err(|e| Bl0942Error::FrameParseError(format!("{e:?}")))?;

    Ok(Frame {
        voltage_raw,
        current_raw,
        power_raw,
        power_factor_raw,
        checksum: expected,
    })
}

/// Uses the `nom` crate to extract the four little-endian 24-bit registers
/// from the packet payload (the bytes between header and checksum).
fn parse_registers(input: &[u8]) -> IResult<&[u8], (u32, u32, u32, u32)> {
    let (input, voltage) = le_u24(input)?;
    let (input, current) = le_u24(input)?;
    let (input, power) = le_u24(input)?;
    let (input, power_factor) = le_u24(input)?;
    Ok((input, (voltage, current, power, power_factor)))
}

/// Packs a frame into its 14-byte wire representation using the stored
/// checksum byte.
pub fn pack_frame(frame: &Frame) -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_LENGTH);
    data.push(PACKET_HEADER);
    for raw in [
        frame.voltage_raw,
        frame.current_raw,
        frame.power_raw,
        frame.power_factor_raw,
    ] {
        data.extend_from_slice(&raw.to_le_bytes()[..3]);
    }
    data.push(frame.checksum);
    data
}

/// Calculates the checksum over the given packet bytes per the datasheet:
/// the read command byte seeds an additive sum over the header and payload,
/// and the result is bit-inverted.
pub fn calculate_checksum(bytes: &[u8]) -> u8 {
    let mut sum = READ_COMMAND;
    for byte in bytes {
        sum = sum.wrapping_add(*byte);
    }
    sum ^ 0xFF
}
