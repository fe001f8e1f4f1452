//! Digital port abstractions
//!
//! Provides the output/input port traits the drivers are written against,
//! the edge-notification contract for interrupt-capable inputs, and
//! adapters for any `embedded-hal` 1.0 pin.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::PortFault;
use crate::time::Instant;

/// Internal resistor configuration requested for an input pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResistorMode {
    /// No internal resistor (externally driven or biased line)
    #[default]
    Disabled,
    /// Pull the line up to VCC
    PullUp,
    /// Pull the line down to GND
    PullDown,
}

/// Digital output port
///
/// Writes are fallible: an I/O expander or a released pin can reject them.
pub trait DigitalOutputPort {
    /// Drive the output to `state` (true = high)
    fn set(&mut self, state: bool) -> Result<(), PortFault>;

    /// Last level successfully written
    fn state(&self) -> bool;

    /// Drive the output high
    fn set_high(&mut self) -> Result<(), PortFault> {
        self.set(true)
    }

    /// Drive the output low
    fn set_low(&mut self) -> Result<(), PortFault> {
        self.set(false)
    }

    /// Invert the output level
    fn toggle(&mut self) -> Result<(), PortFault> {
        let next = !self.state();
        self.set(next)
    }
}

/// Digital input port
pub trait DigitalInputPort {
    /// Sample the current level (true = high)
    ///
    /// Takes `&mut self` because some ports clear latches or talk to a bus.
    fn level(&mut self) -> Result<bool, PortFault>;
}

/// Receiver of edge notifications from an [`InterruptPort`]
///
/// Called from the port's notification context, which may be an interrupt
/// handler or another task. Implementations must synchronise their own state.
pub trait ChangeListener: Sync {
    /// The input changed to `level` at `at`
    fn level_changed(&self, level: bool, at: Instant);
}

/// Digital input that reports every level change to one listener
pub trait InterruptPort<'a>: DigitalInputPort {
    /// Register the listener that receives every subsequent change
    ///
    /// A port supports a single listener; a second registration fails with
    /// [`PortFault::ListenerSlotTaken`].
    fn register_change_listener(
        &mut self,
        listener: &'a dyn ChangeListener,
    ) -> Result<(), PortFault>;
}

/// Single listener slot for building [`InterruptPort`] implementations
///
/// The board's edge interrupt calls [`ListenerSlot::notify`] with the new
/// level and the timestamp it latched.
#[derive(Default)]
pub struct ListenerSlot<'a> {
    listener: Option<&'a dyn ChangeListener>,
}

impl<'a> ListenerSlot<'a> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self { listener: None }
    }

    /// Store the listener
    pub fn register(&mut self, listener: &'a dyn ChangeListener) -> Result<(), PortFault> {
        if self.listener.is_some() {
            return Err(PortFault::ListenerSlotTaken);
        }
        self.listener = Some(listener);
        Ok(())
    }

    /// Check if a listener is registered
    pub fn is_registered(&self) -> bool {
        self.listener.is_some()
    }

    /// Forward a change to the listener, if any
    pub fn notify(&self, level: bool, at: Instant) {
        if let Some(listener) = self.listener {
            listener.level_changed(level, at);
        }
    }
}

/// [`DigitalOutputPort`] over an `embedded-hal` output pin
pub struct HalOutput<P> {
    pin: P,
    state: bool,
}

impl<P: OutputPin> HalOutput<P> {
    /// Wrap `pin` and drive it to `initial`
    pub fn new(pin: P, initial: bool) -> Result<Self, PortFault> {
        let mut port = Self {
            pin,
            state: !initial,
        };
        port.set(initial)?;
        Ok(port)
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DigitalOutputPort for HalOutput<P> {
    fn set(&mut self, state: bool) -> Result<(), PortFault> {
        let result = if state {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| PortFault::WriteFailed)?;
        self.state = state;
        Ok(())
    }

    fn state(&self) -> bool {
        self.state
    }
}

/// [`DigitalInputPort`] over an `embedded-hal` input pin
pub struct HalInput<P> {
    pin: P,
}

impl<P: InputPin> HalInput<P> {
    /// Wrap `pin`
    ///
    /// The caller configures the resistor mode when creating the pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DigitalInputPort for HalInput<P> {
    fn level(&mut self) -> Result<bool, PortFault> {
        self.pin.is_high().map_err(|_| PortFault::ReadFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock embedded-hal pin for testing
    struct MockPin {
        high: bool,
        fail: bool,
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }
    }

    struct FixedInput(bool);

    impl ErrorType for FixedInput {
        type Error = Infallible;
    }

    impl InputPin for FixedInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[derive(Default)]
    struct Recorder {
        level: AtomicBool,
        at_us: AtomicU64,
    }

    impl ChangeListener for Recorder {
        fn level_changed(&self, level: bool, at: Instant) {
            self.level.store(level, Ordering::Relaxed);
            self.at_us.store(at.as_micros(), Ordering::Relaxed);
        }
    }

    #[test]
    fn test_hal_output_tracks_state() {
        let mut port = HalOutput::new(MockPin { high: true, fail: false }, false).unwrap();
        assert!(!port.state());

        port.set_high().unwrap();
        assert!(port.state());

        port.toggle().unwrap();
        assert!(!port.state());
        assert!(!port.into_inner().high);
    }

    #[test]
    fn test_hal_output_write_failure() {
        let result = HalOutput::new(MockPin { high: false, fail: true }, true);
        assert!(matches!(result, Err(PortFault::WriteFailed)));
    }

    #[test]
    fn test_hal_input_level() {
        let mut port = HalInput::new(FixedInput(true));
        assert_eq!(port.level(), Ok(true));
    }

    #[test]
    fn test_listener_slot() {
        let recorder = Recorder::default();
        let mut slot = ListenerSlot::new();

        // No listener: notify is a no-op
        slot.notify(true, Instant::from_micros(5));
        assert!(!slot.is_registered());
        assert_eq!(recorder.at_us.load(Ordering::Relaxed), 0);

        slot.register(&recorder).unwrap();
        slot.notify(true, Instant::from_micros(42));
        assert!(recorder.level.load(Ordering::Relaxed));
        assert_eq!(recorder.at_us.load(Ordering::Relaxed), 42);

        // Only one listener per port
        assert_eq!(slot.register(&recorder), Err(PortFault::ListenerSlotTaken));
    }
}
