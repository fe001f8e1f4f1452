//! Soil moisture sensor implementations
//!
//! - Capacitive probes with an analog output that falls as moisture rises

pub mod capacitive;

pub use capacitive::{
    voltage_to_moisture, Capacitive, MoistureError, DEFAULT_SAMPLES, DEFAULT_SAMPLE_INTERVAL_MS,
};
