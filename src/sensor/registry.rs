//! # Sensor Registry
//!
//! Holds the static bindings from physical quantity to output sink. A
//! binding is set once at configuration time and never reassigned; a
//! quantity without a binding is simply skipped at publish time.

use crate::logging::log_debug;

/// The physical quantities a BL0942 data packet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Voltage,
    Current,
    Power,
    PowerFactor,
}

impl QuantityKind {
    /// All quantities, in packet order.
    pub const ALL: [QuantityKind; 4] = [
        QuantityKind::Voltage,
        QuantityKind::Current,
        QuantityKind::Power,
        QuantityKind::PowerFactor,
    ];
}

/// An external consumer of converted readings.
pub trait Sink: Send {
    /// Receives one converted value per successful poll cycle.
    fn publish(&mut self, value: f64);
}

/// Registry of per-quantity sinks, read-only after setup.
#[derive(Default)]
pub struct SensorRegistry {
    voltage: Option<Box<dyn Sink>>,
    current: Option<Box<dyn Sink>>,
    power: Option<Box<dyn Sink>>,
    power_factor: Option<Box<dyn Sink>>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        SensorRegistry::default()
    }

    /// Binds a sink for the given quantity. Called once per quantity during
    /// setup; a later call replaces the binding.
    pub fn bind(&mut self, kind: QuantityKind, sink: Box<dyn Sink>) {
        *self.slot_mut(kind) = Some(sink);
    }

    /// Returns whether a sink is bound for the given quantity.
    pub fn is_bound(&self, kind: QuantityKind) -> bool {
        match kind {
            QuantityKind::Voltage => self.voltage.is_some(),
            QuantityKind::Current => self.current.is_some(),
            QuantityKind::Power => self.power.is_some(),
            QuantityKind::PowerFactor => self.power_factor.is_some(),
        }
    }

    /// Publishes a value to the sink bound for the given quantity; no-op
    /// when none is bound.
    pub fn publish(&mut self, kind: QuantityKind, value: f64) {
        match self.slot_mut(kind) {
            Some(sink) => sink.publish(value),
            None => log_debug(&format!("no sink bound for {kind:?}, skipping")),
        }
    }

    fn slot_mut(&mut self, kind: QuantityKind) -> &mut Option<Box<dyn Sink>> {
        match kind {
            QuantityKind::Voltage => &mut self.voltage,
            QuantityKind::Current => &mut self.current,
            QuantityKind::Power => &mut self.power,
            QuantityKind::PowerFactor => &mut self.power_factor,
        }
    }
}
