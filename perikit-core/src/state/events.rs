//! Events that drive the echo cycle

/// Inputs to the echo-cycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoEvent {
    /// Trigger pulse sent by the owner
    Trigger,
    /// Echo line went high
    EchoRise,
    /// Echo line went low
    EchoFall,
    /// The current phase outlived its timeout
    Expire,
}

impl EchoEvent {
    /// Map an echo line level change to its event
    pub fn from_level(level: bool) -> Self {
        if level {
            EchoEvent::EchoRise
        } else {
            EchoEvent::EchoFall
        }
    }
}
