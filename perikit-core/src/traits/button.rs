//! Button trait

/// Trait for momentary push buttons
pub trait Button {
    /// Error type for sampling the button
    type Error;

    /// Raw pressed state, bypassing debounce
    ///
    /// Takes `&mut self` because sampling the port requires mutable access.
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}
