//! RGB LED on three PWM channels

use embedded_hal::pwm::SetDutyCycle;
use perikit_core::color::Color;
use perikit_core::config::{CommonType, LedConfig};
use perikit_core::traits::RgbLed;
use perikit_hal::PortFault;

use super::set_fraction;

/// RGB LED driver
///
/// Each channel's duty is `component * brightness * max_brightness`. For a
/// common-anode LED the duty is inverted.
pub struct RgbPwmLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    config: LedConfig,
    color: Color,
    brightness: f32,
}

impl<R, G, B> RgbPwmLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create a driver with all channels off
    pub fn new(red: R, green: G, blue: B, config: LedConfig) -> Result<Self, PortFault> {
        let mut led = Self {
            red,
            green,
            blue,
            config,
            color: Color::BLACK,
            brightness: 1.0,
        };
        led.apply()?;
        Ok(led)
    }

    /// Output brightness (0.0 - 1.0), on top of the configured ceiling
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set brightness, clamped to `0.0..=1.0`, and refresh the output
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), PortFault> {
        let previous = self.brightness;
        self.brightness = brightness.clamp(0.0, 1.0);
        if let Err(fault) = self.apply() {
            self.brightness = previous;
            self.restore();
            return Err(fault);
        }
        Ok(())
    }

    /// Colour actually driven after brightness scaling
    pub fn output_color(&self) -> Color {
        self.color
            .clamped()
            .scale(self.brightness * self.config.max_brightness)
    }

    fn apply(&mut self) -> Result<(), PortFault> {
        let out = self.output_color();
        let inverted = self.config.common == CommonType::Anode;

        set_fraction(&mut self.red, out.r, inverted)?;
        set_fraction(&mut self.green, out.g, inverted)?;
        set_fraction(&mut self.blue, out.b, inverted)
    }

    /// Re-drive the stored state after a failed write left channels mixed
    fn restore(&mut self) {
        if self.apply().is_err() {
            warn!("rgb: channels left partially updated");
        }
    }
}

impl<R, G, B> RgbLed for RgbPwmLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    type Error = PortFault;

    fn set_color(&mut self, color: Color) -> Result<(), PortFault> {
        let previous = self.color;
        self.color = color;
        if let Err(fault) = self.apply() {
            self.color = previous;
            self.restore();
            return Err(fault);
        }
        Ok(())
    }

    fn color(&self) -> Color {
        self.color
    }
}
