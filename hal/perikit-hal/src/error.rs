//! Port error type

/// Errors reported by a port implementation
///
/// Drivers never retry these; they are surfaced to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortFault {
    /// Driving an output failed
    WriteFailed,
    /// Sampling an input failed
    ReadFailed,
    /// The port already has a change listener registered
    ListenerSlotTaken,
    /// The port handle is not usable (unconfigured or released pin)
    InvalidPort,
}
