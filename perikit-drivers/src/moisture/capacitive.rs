//! Capacitive soil moisture probe
//!
//! The probe outputs a voltage that drops as the soil gets wetter. Two
//! calibration voltages mark the ends of the range; readings are mapped
//! linearly between them and clamped.
//!
//! Boards exposing raw ADC counts can wrap the channel in
//! [`perikit_hal::ScaledAdc`].

use embedded_hal::delay::DelayNs;
use perikit_core::config::MoistureCalibration;
use perikit_core::notify::{EventHub, MoistureChange};
use perikit_core::traits::MoistureSensor;
use perikit_hal::{AnalogInputPort, PortFault};

/// Samples averaged by [`Capacitive::read_default`]
pub const DEFAULT_SAMPLES: u8 = 10;

/// Spacing between averaged samples (ms)
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 40;

/// Moisture sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoistureError {
    /// The analog port failed
    Port(PortFault),
    /// Calibration voltages are equal or not finite
    InvalidCalibration,
    /// A read was requested with zero samples
    NoSamples,
}

impl From<PortFault> for MoistureError {
    fn from(fault: PortFault) -> Self {
        MoistureError::Port(fault)
    }
}

/// Map a probe voltage to a moisture fraction
///
/// 0.0 at the high (dry) end of the calibration, 1.0 at the low (wet) end.
pub fn voltage_to_moisture(volts: f32, calibration: &MoistureCalibration) -> f32 {
    let (wet, dry) = calibration.ordered();
    let position = (volts - wet) / (dry - wet);
    (1.0 - position).clamp(0.0, 1.0)
}

/// Capacitive moisture sensor driver
pub struct Capacitive<'a, A> {
    port: A,
    calibration: MoistureCalibration,
    events: &'a EventHub<MoistureChange>,
    moisture: Option<f32>,
}

impl<'a, A: AnalogInputPort> Capacitive<'a, A> {
    /// Create a driver publishing changes to `events`
    pub fn new(
        port: A,
        calibration: MoistureCalibration,
        events: &'a EventHub<MoistureChange>,
    ) -> Result<Self, MoistureError> {
        if !calibration.is_valid() {
            return Err(MoistureError::InvalidCalibration);
        }
        Ok(Self {
            port,
            calibration,
            events,
            moisture: None,
        })
    }

    /// Active calibration
    pub fn calibration(&self) -> &MoistureCalibration {
        &self.calibration
    }

    /// Average `samples` readings taken `interval_ms` apart
    ///
    /// Stores the result, publishes a [`MoistureChange`] and returns the
    /// moisture fraction.
    pub fn read<D: DelayNs>(
        &mut self,
        samples: u8,
        interval_ms: u32,
        delay: &mut D,
    ) -> Result<f32, MoistureError> {
        if samples == 0 {
            return Err(MoistureError::NoSamples);
        }
        let volts = self.port.read_average(samples, interval_ms, delay)?;
        Ok(self.record(volts))
    }

    /// [`Self::read`] with the default sample count and spacing
    pub fn read_default<D: DelayNs>(&mut self, delay: &mut D) -> Result<f32, MoistureError> {
        self.read(DEFAULT_SAMPLES, DEFAULT_SAMPLE_INTERVAL_MS, delay)
    }

    fn record(&mut self, volts: f32) -> f32 {
        let moisture = voltage_to_moisture(volts, &self.calibration);
        let change = MoistureChange {
            new: moisture,
            old: self.moisture.replace(moisture),
        };
        debug!("moisture: {} V -> {}", volts, moisture);
        self.events.publish(change);
        moisture
    }
}

impl<A: AnalogInputPort> MoistureSensor for Capacitive<'_, A> {
    type Error = MoistureError;

    fn read_moisture(&mut self) -> Result<f32, MoistureError> {
        let volts = self.port.read_voltage()?;
        Ok(self.record(volts))
    }

    fn moisture(&self) -> Option<f32> {
        self.moisture
    }
}
