//! Mock ports for host tests
//!
//! Each mock is split into a line (owned by the test, inspected and driven
//! through shared references) and a port handle that the driver owns.

extern crate std;

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use perikit_hal::{
    AnalogInputPort, ChangeListener, DigitalInputPort, DigitalOutputPort, Instant, InterruptPort,
    ListenerSlot, Monotonic, PortFault,
};

/// Recorded output line
#[derive(Default)]
pub(crate) struct OutputLine {
    writes: RefCell<Vec<bool>>,
    fail: Cell<bool>,
}

impl OutputLine {
    pub(crate) fn port(&self) -> MockOutput<'_> {
        MockOutput {
            line: self,
            state: false,
        }
    }

    pub(crate) fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    pub(crate) fn level(&self) -> Option<bool> {
        self.writes.borrow().last().copied()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }
}

pub(crate) struct MockOutput<'l> {
    line: &'l OutputLine,
    state: bool,
}

impl DigitalOutputPort for MockOutput<'_> {
    fn set(&mut self, state: bool) -> Result<(), PortFault> {
        if self.line.fail.get() {
            return Err(PortFault::WriteFailed);
        }
        self.line.writes.borrow_mut().push(state);
        self.state = state;
        Ok(())
    }

    fn state(&self) -> bool {
        self.state
    }
}

/// Input line that forwards edges to the registered listener
#[derive(Default)]
pub(crate) struct EdgeLine<'a> {
    level: Cell<bool>,
    slot: RefCell<ListenerSlot<'a>>,
    fail: Cell<bool>,
}

impl<'a> EdgeLine<'a> {
    pub(crate) fn port(&self) -> MockInput<'_, 'a> {
        MockInput { line: self }
    }

    /// Change the level and notify as the board's edge interrupt would
    pub(crate) fn fire(&self, level: bool, at_us: u64) {
        self.level.set(level);
        self.slot.borrow().notify(level, Instant::from_micros(at_us));
    }

    /// Change the level without a notification
    pub(crate) fn set_level(&self, level: bool) {
        self.level.set(level);
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail.set(fail);
    }
}

pub(crate) struct MockInput<'l, 'a> {
    line: &'l EdgeLine<'a>,
}

impl DigitalInputPort for MockInput<'_, '_> {
    fn level(&mut self) -> Result<bool, PortFault> {
        if self.line.fail.get() {
            return Err(PortFault::ReadFailed);
        }
        Ok(self.line.level.get())
    }
}

impl<'a> InterruptPort<'a> for MockInput<'_, 'a> {
    fn register_change_listener(
        &mut self,
        listener: &'a dyn ChangeListener,
    ) -> Result<(), PortFault> {
        self.line.slot.borrow_mut().register(listener)
    }
}

/// Manually advanced microsecond clock
#[derive(Default)]
pub(crate) struct MockClock {
    micros: Cell<u64>,
}

impl MockClock {
    pub(crate) fn set(&self, micros: u64) {
        self.micros.set(micros);
    }

    pub(crate) fn advance(&self, micros: u64) {
        self.micros.set(self.micros.get() + micros);
    }
}

impl Monotonic for MockClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.micros.get())
    }
}

/// Delay that moves a [`MockClock`] forward instead of blocking
pub(crate) struct MockDelay<'c> {
    clock: &'c MockClock,
}

impl<'c> MockDelay<'c> {
    pub(crate) fn new(clock: &'c MockClock) -> Self {
        Self { clock }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance((ns / 1_000) as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms as u64 * 1_000);
    }
}

/// Analog line with a settable voltage
#[derive(Default)]
pub(crate) struct AnalogLine {
    voltage: Cell<f32>,
    reads: Cell<u32>,
    fail: Cell<bool>,
}

impl AnalogLine {
    pub(crate) fn port(&self) -> MockAnalog<'_> {
        MockAnalog { line: self }
    }

    pub(crate) fn set_voltage(&self, volts: f32) {
        self.voltage.set(volts);
    }

    pub(crate) fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail.set(fail);
    }
}

pub(crate) struct MockAnalog<'l> {
    line: &'l AnalogLine,
}

impl AnalogInputPort for MockAnalog<'_> {
    fn read_voltage(&mut self) -> Result<f32, PortFault> {
        if self.line.fail.get() {
            return Err(PortFault::ReadFailed);
        }
        self.line.reads.set(self.line.reads.get() + 1);
        Ok(self.line.voltage.get())
    }
}

/// PWM channel recording its duty cycle
pub(crate) struct PwmLine {
    duty: Cell<u16>,
    max: u16,
    fail: Cell<bool>,
}

impl Default for PwmLine {
    fn default() -> Self {
        Self {
            duty: Cell::new(0),
            max: 1000,
            fail: Cell::new(false),
        }
    }
}

impl PwmLine {
    pub(crate) fn channel(&self) -> MockPwm<'_> {
        MockPwm { line: self }
    }

    pub(crate) fn duty(&self) -> u16 {
        self.duty.get()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }
}

pub(crate) struct MockPwm<'l> {
    line: &'l PwmLine,
}

impl ErrorType for MockPwm<'_> {
    type Error = ErrorKind;
}

impl SetDutyCycle for MockPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        self.line.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.line.fail.get() {
            return Err(ErrorKind::Other);
        }
        self.line.duty.set(duty);
        Ok(())
    }
}
