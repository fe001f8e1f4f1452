//! RGB colour with HSV conversion
//!
//! Components are normalised to `0.0..=1.0`, which maps directly onto PWM
//! duty fractions.

use libm::floorf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalised RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// Create a colour from normalised components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from 8-bit components
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a colour from hue, saturation and value
    ///
    /// `hue` is a fraction of the colour wheel (0.0 = red, 1/3 = green,
    /// 2/3 = blue) and wraps outside `0.0..1.0`. Saturation and value are
    /// clamped to `0.0..=1.0`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        if s <= 0.0 {
            return Self::new(v, v, v);
        }

        let h6 = (hue - floorf(hue)) * 6.0;
        let sector = floorf(h6);
        let f = h6 - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        // h6 can round up to exactly 6.0 for hues just below 1.0
        match sector as u8 % 6 {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }

    /// Convert to 8-bit components (rounded)
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let c = self.clamped();
        (
            (c.r * 255.0 + 0.5) as u8,
            (c.g * 255.0 + 0.5) as u8,
            (c.b * 255.0 + 0.5) as u8,
        )
    }

    /// Multiply every component by `factor`, clamping the result
    pub fn scale(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor).clamped()
    }

    /// Clamp every component into `0.0..=1.0`
    pub fn clamped(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}
