//! LED traits

use crate::color::Color;

/// Trait for colour LEDs
pub trait RgbLed {
    /// Error type for driving the LED
    type Error;

    /// Show `color`
    fn set_color(&mut self, color: Color) -> Result<(), Self::Error>;

    /// Currently requested colour
    fn color(&self) -> Color;

    /// Switch all channels off
    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.set_color(Color::BLACK)
    }
}
