//! Sensor drivers

pub mod capacitive;
pub mod dht;

pub use capacitive::{AdcReader, CapacitiveProbe};
pub use dht::{Dht, DhtError, DhtVariant};
