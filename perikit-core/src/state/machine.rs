//! Echo-cycle phases and transitions

use super::events::EchoEvent;

/// Where in the pulse cycle a ranging sensor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoPhase {
    /// No measurement in flight
    #[default]
    Idle,
    /// Trigger pulse sent, waiting for the echo line to rise
    Triggered,
    /// Echo line is high, time of flight is accumulating
    EchoHigh,
}

impl EchoPhase {
    /// Check if a measurement is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, EchoPhase::Idle)
    }

    /// Process an event and return the next phase
    ///
    /// Returns `None` when the event is not accepted in this phase: a spurious
    /// edge or a trigger while busy. The caller leaves its state untouched.
    pub fn transition(self, event: EchoEvent) -> Option<Self> {
        use EchoEvent::*;
        use EchoPhase::*;

        match (self, event) {
            (Idle, Trigger) => Some(Triggered),

            // A second rise while high restarts the pulse
            (Triggered, EchoRise) | (EchoHigh, EchoRise) => Some(EchoHigh),

            (EchoHigh, EchoFall) => Some(Idle),

            (Triggered, Expire) | (EchoHigh, Expire) => Some(Idle),

            _ => None,
        }
    }
}
