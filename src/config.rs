//! # Device Configuration
//!
//! Static configuration for a BL0942 device: the poll interval and an
//! optional presentation entry per quantity. Validated at construction time;
//! nothing here is mutable after setup.

use crate::constants::DEFAULT_UPDATE_INTERVAL;
use crate::error::Bl0942Error;
use crate::sensor::registry::QuantityKind;
use std::time::Duration;

/// Presentation metadata for one quantity output.
#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub unit: &'static str,
    pub accuracy_decimals: u8,
}

impl SensorConfig {
    pub const VOLTAGE: SensorConfig = SensorConfig {
        unit: "V",
        accuracy_decimals: 1,
    };
    pub const CURRENT: SensorConfig = SensorConfig {
        unit: "A",
        accuracy_decimals: 3,
    };
    pub const POWER: SensorConfig = SensorConfig {
        unit: "W",
        accuracy_decimals: 1,
    };
    pub const POWER_FACTOR: SensorConfig = SensorConfig {
        unit: "",
        accuracy_decimals: 2,
    };
}

/// Static device configuration. A `None` quantity is measured but never
/// published.
#[derive(Debug, Clone)]
pub struct Bl0942Config {
    pub update_interval: Duration,
    pub voltage: Option<SensorConfig>,
    pub current: Option<SensorConfig>,
    pub power: Option<SensorConfig>,
    pub power_factor: Option<SensorConfig>,
}

impl Default for Bl0942Config {
    fn default() -> Self {
        Bl0942Config {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            voltage: Some(SensorConfig::VOLTAGE),
            current: Some(SensorConfig::CURRENT),
            power: Some(SensorConfig::POWER),
            power_factor: Some(SensorConfig::POWER_FACTOR),
        }
    }
}

impl Bl0942Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Bl0942Error> {
        if self.update_interval.is_zero() {
            return Err(Bl0942Error::InvalidConfig(
                "update_interval must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Returns the presentation entry for the given quantity, if enabled.
    pub fn sensor(&self, kind: QuantityKind) -> Option<&SensorConfig> {
        match kind {
            QuantityKind::Voltage => self.voltage.as_ref(),
            QuantityKind::Current => self.current.as_ref(),
            QuantityKind::Power => self.power.as_ref(),
            QuantityKind::PowerFactor => self.power_factor.as_ref(),
        }
    }
}
