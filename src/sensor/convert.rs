//! # Unit Conversion
//!
//! Maps raw BL0942 register values to physical quantities using the fixed
//! device scale constants. Pure arithmetic; register widths are bounded at
//! 24 bits so every value is representable after scaling.

use crate::constants::{CURRENT_SCALE, POWER_FACTOR_SCALE, POWER_SCALE, VOLTAGE_SCALE};
use crate::sensor::registry::QuantityKind;
use crate::uart::frame::Frame;

/// One converted measurement tuple, produced once per successful poll cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Volts
    pub voltage: f64,
    /// Amperes
    pub current: f64,
    /// Watts
    pub power: f64,
    /// Dimensionless, in [0, 1] per device convention
    pub power_factor: f64,
}

impl Reading {
    /// Returns the value for the given quantity.
    pub fn get(&self, kind: QuantityKind) -> f64 {
        match kind {
            QuantityKind::Voltage => self.voltage,
            QuantityKind::Current => self.current,
            QuantityKind::Power => self.power,
            QuantityKind::PowerFactor => self.power_factor,
        }
    }
}

/// Converts the raw registers of a decoded packet to physical units.
pub fn convert(frame: &Frame) -> Reading {
    Reading {
        voltage: frame.voltage_raw as f64 / VOLTAGE_SCALE,
        current: frame.current_raw as f64 / CURRENT_SCALE,
        power: frame.power_raw as f64 / POWER_SCALE,
        power_factor: frame.power_factor_raw as f64 / POWER_FACTOR_SCALE,
    }
}
