//! Echo-cycle bookkeeping shared with the echo port

use core::time::Duration;

use perikit_core::config::{RangeFinderConfig, ECHO_US_PER_CM};
use perikit_core::notify::{DistanceEvent, EventHub, EventSubscriber, NotifyError};
use perikit_core::state::{EchoEvent, EchoPhase};
use perikit_core::sync::Shared;
use perikit_hal::{ChangeListener, Instant};

/// Convert an echo pulse width to centimetres
///
/// `cm = us / 58`: sound covers the distance twice at ~340 m/s.
pub fn echo_to_cm(width: Duration) -> f32 {
    width.as_micros() as f32 / ECHO_US_PER_CM
}

#[derive(Debug, Clone, Copy)]
struct Cycle {
    phase: EchoPhase,
    /// Rising edge of the current pulse (valid in `EchoHigh`)
    pulse_start: Instant,
    /// When the current non-idle phase began
    phase_entered: Instant,
    distance: Option<f32>,
}

impl Cycle {
    const fn new() -> Self {
        Self {
            phase: EchoPhase::Idle,
            pulse_start: Instant::ZERO,
            phase_entered: Instant::ZERO,
            distance: None,
        }
    }

    /// Return to `Idle` if the current phase began `timeout` or more before `now`
    fn expire(&mut self, now: Instant, timeout: Duration) -> bool {
        if now.saturating_duration_since(self.phase_entered) < timeout {
            return false;
        }
        match self.phase.transition(EchoEvent::Expire) {
            Some(next) => {
                self.phase = next;
                self.distance = None;
                true
            }
            None => false,
        }
    }
}

/// What an echo edge did to the cycle
enum EdgeOutcome {
    /// The cycle had already outlived the timeout; the edge was dropped
    Expired,
    Ignored,
    PulseStarted,
    Detected(f32),
    OutOfRange,
}

/// Measurement state for one range finder
///
/// Lives outside the driver so the echo port can hold a reference to it as
/// its [`ChangeListener`]. Typically a `static`:
///
/// ```ignore
/// static SONAR: EchoTracker = EchoTracker::new(RangeFinderConfig::hysrf05());
/// ```
pub struct EchoTracker {
    cycle: Shared<Cycle>,
    events: EventHub<DistanceEvent>,
    config: RangeFinderConfig,
}

impl EchoTracker {
    /// Create an idle tracker with no reading
    pub const fn new(config: RangeFinderConfig) -> Self {
        Self {
            cycle: Shared::new(Cycle::new()),
            events: EventHub::new(),
            config,
        }
    }

    /// Calibration envelope and timing
    pub fn config(&self) -> &RangeFinderConfig {
        &self.config
    }

    /// Observe readings and timeouts
    pub fn subscribe(&self) -> Result<EventSubscriber<'_, DistanceEvent>, NotifyError> {
        self.events.subscribe()
    }

    /// Current cycle phase
    ///
    /// Timeouts are applied by [`Self::expire_if_due`] and by the next echo
    /// edge, so an abandoned cycle can still read as busy here until one of
    /// them runs. `DistanceEstimator::phase` checks the clock first.
    pub fn phase(&self) -> EchoPhase {
        self.cycle.with(|c| c.phase)
    }

    /// Last valid distance (cm)
    pub fn distance(&self) -> Option<f32> {
        self.cycle.with(|c| c.distance)
    }

    /// Claim the tracker for a new cycle
    ///
    /// Returns false if a cycle is already in flight. Otherwise clears the
    /// previous reading; the phase stays `Idle` until [`Self::enter_triggered`].
    pub(crate) fn begin(&self) -> bool {
        self.cycle.with_mut(|c| {
            if c.phase.is_busy() {
                return false;
            }
            c.distance = None;
            true
        })
    }

    /// Trigger pulse sent at `at`
    pub(crate) fn enter_triggered(&self, at: Instant) {
        self.cycle.with_mut(|c| {
            if let Some(next) = c.phase.transition(EchoEvent::Trigger) {
                c.phase = next;
                c.pulse_start = at;
                c.phase_entered = at;
            }
        });
    }

    /// Drop a cycle whose trigger pulse could not be completed
    pub(crate) fn abort(&self) {
        self.cycle.with_mut(|c| {
            c.phase = EchoPhase::Idle;
            c.distance = None;
        });
    }

    /// Retire the cycle if it has outlived the echo timeout
    ///
    /// Publishes [`DistanceEvent::TimedOut`] and returns true exactly once
    /// per abandoned cycle.
    pub(crate) fn expire_if_due(&self, now: Instant) -> bool {
        let timeout = self.config.echo_timeout();

        let expired = self.cycle.with_mut(|c| c.expire(now, timeout));
        if expired {
            self.publish_timeout();
        }
        expired
    }

    fn publish_timeout(&self) {
        warn!(
            "echo: no response within {} us",
            self.config.echo_timeout().as_micros() as u64
        );
        self.events.publish(DistanceEvent::TimedOut);
    }

    fn apply_edge(&self, level: bool, at: Instant) -> EdgeOutcome {
        let event = EchoEvent::from_level(level);
        let timeout = self.config.echo_timeout();

        self.cycle.with_mut(|c| {
            if c.expire(at, timeout) {
                return EdgeOutcome::Expired;
            }
            let Some(next) = c.phase.transition(event) else {
                return EdgeOutcome::Ignored;
            };
            c.phase = next;

            match event {
                EchoEvent::EchoRise => {
                    c.pulse_start = at;
                    c.phase_entered = at;
                    EdgeOutcome::PulseStarted
                }
                EchoEvent::EchoFall => {
                    let cm = echo_to_cm(at.saturating_duration_since(c.pulse_start));
                    if self.config.contains(cm) {
                        c.distance = Some(cm);
                        EdgeOutcome::Detected(cm)
                    } else {
                        c.distance = None;
                        EdgeOutcome::OutOfRange
                    }
                }
                EchoEvent::Trigger | EchoEvent::Expire => EdgeOutcome::Ignored,
            }
        })
    }
}

impl ChangeListener for EchoTracker {
    fn level_changed(&self, level: bool, at: Instant) {
        match self.apply_edge(level, at) {
            EdgeOutcome::Detected(cm) => {
                debug!("echo: {} cm", cm);
                self.events.publish(DistanceEvent::Detected(cm));
            }
            EdgeOutcome::OutOfRange => debug!("echo: pulse outside envelope"),
            EdgeOutcome::Expired => self.publish_timeout(),
            EdgeOutcome::PulseStarted => {}
            EdgeOutcome::Ignored => debug!("echo: spurious edge (level {})", level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fall_at(tracker: &EchoTracker, rise_us: u64, fall_us: u64) {
        tracker.level_changed(true, Instant::from_micros(rise_us));
        tracker.level_changed(false, Instant::from_micros(fall_us));
    }

    #[test]
    fn test_echo_to_cm() {
        assert_eq!(echo_to_cm(Duration::from_micros(5_800)), 100.0);
        assert_eq!(echo_to_cm(Duration::from_micros(116)), 2.0);
        assert_eq!(echo_to_cm(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_edges_ignored_while_idle() {
        let tracker = EchoTracker::new(RangeFinderConfig::hysrf05());
        let mut events = tracker.subscribe().unwrap();

        fall_at(&tracker, 0, 5_800);

        assert_eq!(tracker.phase(), EchoPhase::Idle);
        assert_eq!(tracker.distance(), None);
        assert_eq!(events.try_next_message_pure(), None);
    }

    #[test]
    fn test_begin_rejects_busy() {
        let tracker = EchoTracker::new(RangeFinderConfig::hysrf05());

        assert!(tracker.begin());
        tracker.enter_triggered(Instant::from_micros(10));
        assert!(!tracker.begin());
        assert_eq!(tracker.phase(), EchoPhase::Triggered);

        tracker.abort();
        assert_eq!(tracker.phase(), EchoPhase::Idle);
    }

    #[test]
    fn test_expiry_only_when_due() {
        let tracker = EchoTracker::new(RangeFinderConfig::hysrf05());
        let timeout = tracker.config().echo_timeout().as_micros() as u64;

        // Idle cycles never expire
        assert!(!tracker.expire_if_due(Instant::from_micros(1_000_000)));

        tracker.begin();
        tracker.enter_triggered(Instant::from_micros(100));
        assert!(!tracker.expire_if_due(Instant::from_micros(100 + timeout - 1)));
        assert!(tracker.expire_if_due(Instant::from_micros(100 + timeout)));
        assert!(!tracker.expire_if_due(Instant::from_micros(100 + timeout + 1)));
    }

    #[test]
    fn test_rise_restarts_timeout_window() {
        let tracker = EchoTracker::new(RangeFinderConfig::hysrf05());
        let timeout = tracker.config().echo_timeout().as_micros() as u64;

        tracker.begin();
        tracker.enter_triggered(Instant::ZERO);
        tracker.level_changed(true, Instant::from_micros(500));

        assert!(!tracker.expire_if_due(Instant::from_micros(timeout)));
        assert!(tracker.expire_if_due(Instant::from_micros(500 + timeout)));
    }

    #[test]
    fn test_late_edge_expires_cycle() {
        let tracker = EchoTracker::new(RangeFinderConfig::hysrf05());
        let mut events = tracker.subscribe().unwrap();
        let timeout = tracker.config().echo_timeout().as_micros() as u64;

        tracker.begin();
        tracker.enter_triggered(Instant::ZERO);
        tracker.level_changed(true, Instant::from_micros(100));
        // Fall lands exactly on the deadline of the rise
        tracker.level_changed(false, Instant::from_micros(100 + timeout));

        assert_eq!(tracker.phase(), EchoPhase::Idle);
        assert_eq!(tracker.distance(), None);
        assert_eq!(events.try_next_message_pure(), Some(DistanceEvent::TimedOut));
        assert_eq!(events.try_next_message_pure(), None);
        assert!(!tracker.expire_if_due(Instant::from_micros(200 + timeout)));
    }
}
