//! Perikit Hardware Abstraction Layer
//!
//! This crate defines the port traits the peripheral drivers consume. A
//! board support crate implements them on top of its chip HAL; tests
//! implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  perikit-drivers (relay, range, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  perikit-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  board crate  │
//! │   adapters    │       │ (interrupts)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutputPort`], [`gpio::DigitalInputPort`] - Digital I/O
//! - [`gpio::InterruptPort`], [`gpio::ChangeListener`] - Edge notification
//! - [`analog::AnalogInputPort`] - Voltage sampling
//! - [`time::Monotonic`] - Microsecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod error;
pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use analog::{AdcReader, AnalogInputPort, ScaledAdc};
pub use error::PortFault;
pub use gpio::{
    ChangeListener, DigitalInputPort, DigitalOutputPort, HalInput, HalOutput, InterruptPort,
    ListenerSlot, ResistorMode,
};
pub use time::{Instant, Monotonic};
