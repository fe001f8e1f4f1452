//! Peripheral driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in perikit-core, written against the port traits of perikit-hal:
//!
//! - Ultrasonic pulse-echo range finders (HY-SRF05, HC-SR04)
//! - Relays (normally open / normally closed)
//! - Push buttons with debounce and long-press detection
//! - PIR motion sensors
//! - Capacitive soil moisture sensors
//! - PWM and RGB LEDs

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod button;
pub mod led;
pub mod moisture;
pub mod motion;
pub mod range;
pub mod relay;

#[cfg(test)]
mod testing;
