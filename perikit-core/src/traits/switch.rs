//! On/off actuator trait

/// Anything that can be switched on and off (relays, single LEDs)
pub trait Switchable {
    /// Error type for switching
    type Error;

    /// Turn on or off
    fn set_on(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Check if currently on
    fn is_on(&self) -> bool;

    /// Flip the current state
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let next = !self.is_on();
        self.set_on(next)
    }
}
