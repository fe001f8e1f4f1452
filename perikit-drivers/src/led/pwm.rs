//! PWM-dimmed LED

use embedded_hal::pwm::SetDutyCycle;
use perikit_core::traits::Switchable;
use perikit_hal::PortFault;

use super::set_fraction;

/// Single LED on a PWM channel
///
/// Brightness is remembered while the LED is off and applied when it is
/// switched back on.
pub struct PwmLed<P> {
    channel: P,
    brightness: f32,
    on: bool,
}

impl<P: SetDutyCycle> PwmLed<P> {
    /// Create a driver at full brightness, switched off
    pub fn new(channel: P) -> Result<Self, PortFault> {
        let mut led = Self {
            channel,
            brightness: 1.0,
            on: false,
        };
        led.apply()?;
        Ok(led)
    }

    /// Current brightness (0.0 - 1.0)
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set brightness, clamped to `0.0..=1.0`
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), PortFault> {
        let previous = self.brightness;
        self.brightness = brightness.clamp(0.0, 1.0);
        if let Err(fault) = self.apply() {
            self.brightness = previous;
            return Err(fault);
        }
        Ok(())
    }

    fn apply(&mut self) -> Result<(), PortFault> {
        let level = if self.on { self.brightness } else { 0.0 };
        set_fraction(&mut self.channel, level, false)
    }
}

impl<P: SetDutyCycle> Switchable for PwmLed<P> {
    type Error = PortFault;

    fn set_on(&mut self, on: bool) -> Result<(), PortFault> {
        let previous = self.on;
        self.on = on;
        if let Err(fault) = self.apply() {
            self.on = previous;
            return Err(fault);
        }
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
