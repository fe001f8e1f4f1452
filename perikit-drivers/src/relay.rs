//! Relay output
//!
//! Switches a relay coil through a digital output port (directly or via a
//! transistor/driver board).

use perikit_core::config::RelayType;
use perikit_core::traits::Switchable;
use perikit_hal::{DigitalOutputPort, PortFault};

/// Relay driver
///
/// "On" means the load circuit is closed. For a normally-closed relay that
/// is the de-energised state, so the output level is inverted.
pub struct Relay<P> {
    port: P,
    relay_type: RelayType,
    /// Current logical state (true = load on)
    on: bool,
}

impl<P: DigitalOutputPort> Relay<P> {
    /// Create a relay driver and switch the load off
    pub fn new(port: P, relay_type: RelayType) -> Result<Self, PortFault> {
        let mut relay = Self {
            port,
            relay_type,
            on: true,
        };
        relay.set_on(false)?;
        Ok(relay)
    }

    /// Create a driver for a normally-open relay
    pub fn normally_open(port: P) -> Result<Self, PortFault> {
        Self::new(port, RelayType::NormallyOpen)
    }

    /// Create a driver for a normally-closed relay
    pub fn normally_closed(port: P) -> Result<Self, PortFault> {
        Self::new(port, RelayType::NormallyClosed)
    }

    /// Contact type
    pub fn relay_type(&self) -> RelayType {
        self.relay_type
    }

    /// Release the output port
    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P: DigitalOutputPort> Switchable for Relay<P> {
    type Error = PortFault;

    fn set_on(&mut self, on: bool) -> Result<(), PortFault> {
        // NO: on -> high. NC: on -> low.
        let level = on == self.relay_type.on_level();
        self.port.set(level)?;
        self.on = on;
        debug!("relay: {}", if on { "on" } else { "off" });
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
