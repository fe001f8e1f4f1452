//! Range finder trait

/// Trait for distance sensors
///
/// Measurement is asynchronous: [`RangeFinder::measure`] starts a cycle and
/// returns, and the result shows up in [`RangeFinder::current_distance`] (and
/// on the driver's event hub) once the echo completes.
pub trait RangeFinder {
    /// Error type for starting a measurement
    type Error;

    /// Start a measurement cycle
    ///
    /// A cycle that gets no echo returns to idle once the sensor's echo
    /// timeout has passed. Implementations notice that on their next edge,
    /// poll or measure call, so callers waiting for a reading should keep
    /// polling the driver at least once per timeout period.
    fn measure(&mut self) -> Result<(), Self::Error>;

    /// Last valid distance in centimetres
    ///
    /// `None` while a cycle is in flight, after an out-of-range echo, and
    /// after a timeout. Reading has no side effects.
    fn current_distance(&self) -> Option<f32>;

    /// Smallest distance the sensor reports (cm)
    fn minimum_distance(&self) -> f32;

    /// Largest distance the sensor reports (cm)
    fn maximum_distance(&self) -> f32;
}
