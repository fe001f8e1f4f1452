//! Analog input abstractions
//!
//! Drivers read voltages; boards usually expose raw ADC counts. The
//! [`ScaledAdc`] adapter bridges the two.

use embedded_hal::delay::DelayNs;

use crate::error::PortFault;

/// Analog input port reporting volts
pub trait AnalogInputPort {
    /// Take one sample, in volts
    fn read_voltage(&mut self) -> Result<f32, PortFault>;

    /// Average `samples` readings taken `interval_ms` apart
    ///
    /// Averaging smooths ADC noise. `samples == 0` is treated as one sample.
    fn read_average<D: DelayNs>(
        &mut self,
        samples: u8,
        interval_ms: u32,
        delay: &mut D,
    ) -> Result<f32, PortFault> {
        let count = samples.max(1);
        let mut sum = 0.0f32;

        for i in 0..count {
            if i > 0 && interval_ms > 0 {
                delay.delay_ms(interval_ms);
            }
            sum += self.read_voltage()?;
        }

        Ok(sum / count as f32)
    }
}

/// Raw ADC channel
pub trait AdcReader {
    /// Read the raw conversion result
    fn read_raw(&mut self) -> Result<u16, PortFault>;
}

/// [`AnalogInputPort`] converting raw counts to volts
///
/// `volts = counts * vref / full_scale`
pub struct ScaledAdc<A> {
    adc: A,
    /// Reference voltage in mV
    vref_mv: u16,
    /// Count corresponding to `vref` (4096 for a 12-bit converter)
    full_scale: u16,
}

impl<A: AdcReader> ScaledAdc<A> {
    /// Create an adapter for a 12-bit converter
    pub fn new_12bit(adc: A, vref_mv: u16) -> Self {
        Self::new(adc, vref_mv, 4096)
    }

    /// Create an adapter for an arbitrary resolution
    ///
    /// `full_scale` of zero is bumped to one to keep the division defined.
    pub fn new(adc: A, vref_mv: u16, full_scale: u16) -> Self {
        Self {
            adc,
            vref_mv,
            full_scale: full_scale.max(1),
        }
    }

    /// Reference voltage in volts
    pub fn reference_voltage(&self) -> f32 {
        self.vref_mv as f32 / 1000.0
    }

    /// Convert a raw reading to volts
    pub fn counts_to_volts(&self, counts: u16) -> f32 {
        let counts = counts.min(self.full_scale);
        counts as f32 * self.reference_voltage() / self.full_scale as f32
    }
}

impl<A: AdcReader> AnalogInputPort for ScaledAdc<A> {
    fn read_voltage(&mut self) -> Result<f32, PortFault> {
        let counts = self.adc.read_raw()?;
        Ok(self.counts_to_volts(counts))
    }
}
