//! Board-agnostic core logic for the peripheral drivers
//!
//! This crate contains everything the drivers share that does not depend on
//! a specific port implementation:
//!
//! - Driver-facing traits (range finder, switch, button, motion, moisture, LED)
//! - Echo-cycle state machine for pulse-timing sensors
//! - Event types and the notification hub
//! - Interrupt-safe shared state
//! - Colour math
//! - Configuration type definitions and persistence

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod notify;
pub mod state;
pub mod sync;
pub mod traits;
