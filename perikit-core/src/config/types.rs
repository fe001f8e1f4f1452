//! Driver configuration type definitions
//!
//! Calibration envelopes, timing thresholds and wiring options for each
//! driver. All types have sensible defaults and part-specific presets.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Echo microseconds per centimetre of distance
///
/// Sound covers 1 cm in ~29 us at 340 m/s; the echo travels there and back.
pub const ECHO_US_PER_CM: f32 = 58.0;

/// Datasheet minimum trigger pulse for HC-SR04 class sensors (us)
pub const DEFAULT_TRIGGER_PULSE_US: u32 = 10;

/// Slack added to the longest valid echo before a cycle times out (us)
pub const DEFAULT_TIMEOUT_MARGIN_US: u32 = 4_000;

/// Pulse-echo range finder calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeFinderConfig {
    /// Closest valid reading (cm)
    pub min_cm: f32,
    /// Farthest valid reading (cm)
    pub max_cm: f32,
    /// Trigger high time (us)
    pub trigger_pulse_us: u32,
    /// Added to the longest valid echo to form the timeout (us)
    pub timeout_margin_us: u32,
}

impl Default for RangeFinderConfig {
    fn default() -> Self {
        Self::hysrf05()
    }
}

impl RangeFinderConfig {
    /// Create a config with the given envelope and default timing
    pub const fn new(min_cm: f32, max_cm: f32) -> Self {
        Self {
            min_cm,
            max_cm,
            trigger_pulse_us: DEFAULT_TRIGGER_PULSE_US,
            timeout_margin_us: DEFAULT_TIMEOUT_MARGIN_US,
        }
    }

    /// HY-SRF05: 2 cm - 4.5 m
    pub const fn hysrf05() -> Self {
        Self::new(2.0, 450.0)
    }

    /// HC-SR04: 2 cm - 4 m
    pub const fn hcsr04() -> Self {
        Self::new(2.0, 400.0)
    }

    /// Check that the envelope is usable
    pub fn is_valid(&self) -> bool {
        self.min_cm.is_finite()
            && self.max_cm.is_finite()
            && self.min_cm > 0.0
            && self.max_cm > self.min_cm
            && self.trigger_pulse_us > 0
    }

    /// Check if `cm` lies inside the envelope (inclusive)
    pub fn contains(&self, cm: f32) -> bool {
        cm >= self.min_cm && cm <= self.max_cm
    }

    /// How long a cycle phase may last before it is abandoned
    ///
    /// Longest valid echo (`max_cm` round trip) plus the margin.
    pub fn echo_timeout(&self) -> Duration {
        let longest_us = (self.max_cm * ECHO_US_PER_CM) as u64;
        Duration::from_micros(longest_us + self.timeout_margin_us as u64)
    }
}

/// How a push button is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CircuitTermination {
    /// Button connects the pin to GND (pull-up, active low)
    #[default]
    CommonGround,
    /// Button connects the pin to VCC (pull-down, active high)
    High,
    /// Externally biased; treated as active low
    Floating,
}

impl CircuitTermination {
    /// Input level that means "pressed"
    pub fn pressed_level(&self) -> bool {
        matches!(self, CircuitTermination::High)
    }
}

/// Push button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Wiring
    pub termination: CircuitTermination,
    /// Edges closer than this to the last accepted edge are dropped (ms)
    pub debounce_ms: u32,
    /// Presses longer than this also raise a long-press click (ms)
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            termination: CircuitTermination::CommonGround,
            debounce_ms: 20,
            long_press_ms: 500,
        }
    }
}

impl ButtonConfig {
    /// Default timing with the given wiring
    pub fn with_termination(termination: CircuitTermination) -> Self {
        Self {
            termination,
            ..Self::default()
        }
    }
}

/// Capacitive moisture sensor calibration
///
/// The sensor reads a lower voltage the wetter it is. The two voltages are
/// the ends of the usable range; their order does not matter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoistureCalibration {
    /// One end of the voltage range (V)
    pub min_voltage: f32,
    /// Other end of the voltage range (V)
    pub max_voltage: f32,
}

impl Default for MoistureCalibration {
    fn default() -> Self {
        Self {
            min_voltage: 0.0,
            max_voltage: 3.3,
        }
    }
}

impl MoistureCalibration {
    /// Create a calibration from two voltages
    pub const fn new(min_voltage: f32, max_voltage: f32) -> Self {
        Self {
            min_voltage,
            max_voltage,
        }
    }

    /// Check that the range is non-empty and finite
    pub fn is_valid(&self) -> bool {
        self.min_voltage.is_finite()
            && self.max_voltage.is_finite()
            && (self.max_voltage - self.min_voltage).abs() > f32::EPSILON
    }

    /// Voltage range ordered ascending (wet end, dry end)
    pub fn ordered(&self) -> (f32, f32) {
        if self.min_voltage > self.max_voltage {
            (self.max_voltage, self.min_voltage)
        } else {
            (self.min_voltage, self.max_voltage)
        }
    }
}

/// Relay contact type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelayType {
    /// Circuit closes when energised
    #[default]
    NormallyOpen,
    /// Circuit opens when energised
    NormallyClosed,
}

impl RelayType {
    /// Output level that switches the load on
    pub fn on_level(&self) -> bool {
        matches!(self, RelayType::NormallyOpen)
    }
}

/// RGB LED common pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommonType {
    /// Common cathode: channel lights when driven high
    #[default]
    Cathode,
    /// Common anode: channel lights when driven low
    Anode,
}

/// LED output settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    /// Wiring of the common pin
    pub common: CommonType,
    /// Brightness ceiling applied to every channel (0.0 - 1.0)
    pub max_brightness: f32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            common: CommonType::Cathode,
            max_brightness: 1.0,
        }
    }
}
