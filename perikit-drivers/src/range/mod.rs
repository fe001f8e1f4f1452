//! Ultrasonic pulse-echo range finders
//!
//! Supports HY-SRF05 / HC-SR04 class sensors: a trigger pulse starts a
//! measurement, and the sensor answers with an echo pulse whose width is
//! the round-trip time of flight.
//!
//! ```text
//! trigger  __|‾‾|______________________________
//! echo     ___________|‾‾‾‾‾‾‾‾‾‾‾‾‾‾|_________
//!                     ^ pulse_start  ^ fall: cm = width_us / 58
//! ```
//!
//! The echo port reports edges to an [`EchoTracker`], which may run in
//! interrupt context. The [`DistanceEstimator`] owns the ports and starts
//! cycles; results land in the tracker and on its event hub.

mod tracker;

pub use tracker::{echo_to_cm, EchoTracker};

use embedded_hal::delay::DelayNs;
use perikit_core::config::RangeFinderConfig;
use perikit_core::state::EchoPhase;
use perikit_core::traits::RangeFinder;
use perikit_hal::{DigitalOutputPort, InterruptPort, Monotonic, PortFault};

/// Range finder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// A port rejected a read or write
    PortFault(PortFault),
    /// A measurement is already in flight
    Busy,
    /// The calibration envelope is unusable
    InvalidCalibration,
}

impl From<PortFault> for RangeError {
    fn from(fault: PortFault) -> Self {
        RangeError::PortFault(fault)
    }
}

/// Pulse-echo distance sensor driver
///
/// One measurement cycle at a time: [`RangeFinder::measure`] sends the
/// trigger pulse and returns; the echo edges complete the cycle. A cycle
/// with no echo is abandoned after [`RangeFinderConfig::echo_timeout`].
///
/// The timeout is checked against the clock by [`DistanceEstimator::poll`],
/// [`DistanceEstimator::phase`] and the next `measure`, and against the
/// edge timestamp by any echo edge arriving after the deadline. A caller
/// waiting on a cycle should therefore poll (or read the phase) at least
/// once per timeout period.
pub struct DistanceEstimator<'a, T, E, C, D> {
    trigger: T,
    echo: E,
    tracker: &'a EchoTracker,
    clock: C,
    delay: D,
}

impl<'a, T, E, C, D> DistanceEstimator<'a, T, E, C, D>
where
    T: DigitalOutputPort,
    E: InterruptPort<'a>,
    C: Monotonic,
    D: DelayNs,
{
    /// Bind the driver to its ports
    ///
    /// Drives the trigger low and registers `tracker` as the echo port's
    /// change listener.
    pub fn new(
        mut trigger: T,
        mut echo: E,
        tracker: &'a EchoTracker,
        clock: C,
        delay: D,
    ) -> Result<Self, RangeError> {
        if !tracker.config().is_valid() {
            return Err(RangeError::InvalidCalibration);
        }

        trigger.set_low()?;
        echo.register_change_listener(tracker)?;

        Ok(Self {
            trigger,
            echo,
            tracker,
            clock,
            delay,
        })
    }

    /// Retire a cycle that has outlived the echo timeout
    ///
    /// Call periodically while waiting for a reading. Returns true if a
    /// cycle was abandoned (and [`DistanceEvent::TimedOut`] published).
    ///
    /// [`DistanceEvent::TimedOut`]: perikit_core::notify::DistanceEvent::TimedOut
    pub fn poll(&self) -> bool {
        self.tracker.expire_if_due(self.clock.now())
    }

    /// Current cycle phase
    ///
    /// Retires an overdue cycle first, so a missing echo never reads as busy
    /// past the timeout.
    pub fn phase(&self) -> EchoPhase {
        self.poll();
        self.tracker.phase()
    }

    /// Calibration envelope and timing
    pub fn config(&self) -> &RangeFinderConfig {
        self.tracker.config()
    }

    /// Shared measurement state (for subscribing to events)
    pub fn tracker(&self) -> &'a EchoTracker {
        self.tracker
    }

    /// Sample the raw echo line
    pub fn echo_level(&mut self) -> Result<bool, RangeError> {
        Ok(self.echo.level()?)
    }
}

impl<'a, T, E, C, D> RangeFinder for DistanceEstimator<'a, T, E, C, D>
where
    T: DigitalOutputPort,
    E: InterruptPort<'a>,
    C: Monotonic,
    D: DelayNs,
{
    type Error = RangeError;

    fn measure(&mut self) -> Result<(), RangeError> {
        self.poll();

        if !self.tracker.begin() {
            return Err(RangeError::Busy);
        }

        if let Err(fault) = self.trigger.set_high() {
            warn!("range: trigger write failed: {}", fault);
            return Err(fault.into());
        }
        self.delay.delay_us(self.tracker.config().trigger_pulse_us);

        self.tracker.enter_triggered(self.clock.now());

        if let Err(fault) = self.trigger.set_low() {
            warn!("range: trigger release failed: {}", fault);
            self.tracker.abort();
            return Err(fault.into());
        }

        Ok(())
    }

    fn current_distance(&self) -> Option<f32> {
        self.tracker.distance()
    }

    fn minimum_distance(&self) -> f32 {
        self.tracker.config().min_cm
    }

    fn maximum_distance(&self) -> f32 {
        self.tracker.config().max_cm
    }
}
