//! Moisture sensor trait

/// Trait for soil moisture sensors
pub trait MoistureSensor {
    /// Error type for sampling
    type Error;

    /// Take a single reading and return the moisture fraction
    ///
    /// 0.0 is fully dry, 1.0 fully wet.
    fn read_moisture(&mut self) -> Result<f32, Self::Error>;

    /// Last reading, if any
    fn moisture(&self) -> Option<f32>;
}
