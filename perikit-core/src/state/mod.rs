//! Echo-cycle state machine for pulse-timing sensors
//!
//! Defines which echo-line edges a pulse-echo ranging cycle accepts in each
//! phase. The machine is explicit, finite, and deterministic; timestamps and
//! distance math live with the driver that owns the cycle.

pub mod events;
pub mod machine;

pub use events::EchoEvent;
pub use machine::EchoPhase;
