//! Events emitted by the drivers

/// Range finder notifications
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceEvent {
    /// A complete echo inside the calibrated envelope (centimetres)
    Detected(f32),
    /// No echo completed in time; the reading was invalidated
    TimedOut,
}

/// Push button notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Button went down
    PressStarted,
    /// Button came back up
    PressEnded,
    /// A full press/release cycle
    Clicked,
    /// A press/release cycle that lasted longer than the long-press threshold
    LongPressClicked,
}

/// Motion sensor notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionEvent {
    /// Motion detected
    Started,
    /// No more motion
    Ended,
}

/// Moisture reading change
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoistureChange {
    /// New moisture fraction (0.0 dry - 1.0 wet)
    pub new: f32,
    /// Previous reading, if there was one
    pub old: Option<f32>,
}

impl MoistureChange {
    /// Difference from the previous reading (zero for the first one)
    pub fn delta(&self) -> f32 {
        self.old.map(|old| self.new - old).unwrap_or(0.0)
    }
}
