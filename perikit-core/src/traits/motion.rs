//! Motion sensor trait

/// Trait for presence/motion detectors
pub trait MotionSensor {
    /// Check if the sensor currently reports motion
    fn motion_detected(&self) -> bool;
}
