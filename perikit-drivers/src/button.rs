//! Push button with debounce and long-press detection
//!
//! The button's input port reports every edge to a [`ButtonTracker`]. The
//! tracker filters contact bounce and turns press/release pairs into
//! [`ButtonEvent`]s:
//!
//! ```text
//! press                 -> PressStarted
//! release (short)       -> PressEnded, Clicked
//! release (> long_press) -> LongPressClicked, PressEnded, Clicked
//! ```

use core::time::Duration;

use perikit_core::config::{ButtonConfig, CircuitTermination};
use perikit_core::notify::{ButtonEvent, EventHub, EventSubscriber, NotifyError};
use perikit_core::sync::Shared;
use perikit_core::traits::Button;
use perikit_hal::{ChangeListener, Instant, InterruptPort, PortFault, ResistorMode};

/// Internal resistor a button wired with `termination` needs
pub fn resistor_mode(termination: CircuitTermination) -> ResistorMode {
    match termination {
        CircuitTermination::CommonGround => ResistorMode::PullUp,
        CircuitTermination::High => ResistorMode::PullDown,
        CircuitTermination::Floating => ResistorMode::Disabled,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PressState {
    pressed: bool,
    press_start: Instant,
    /// Last edge that was not rejected as bounce
    last_edge: Option<Instant>,
}

enum EdgeOutcome {
    Bounced,
    Unchanged,
    Pressed,
    Released(Duration),
}

/// Debounced press state shared with the button's input port
pub struct ButtonTracker {
    state: Shared<PressState>,
    events: EventHub<ButtonEvent>,
    config: ButtonConfig,
}

impl ButtonTracker {
    /// Create a tracker in the released state
    pub const fn new(config: ButtonConfig) -> Self {
        Self {
            state: Shared::new(PressState {
                pressed: false,
                press_start: Instant::ZERO,
                last_edge: None,
            }),
            events: EventHub::new(),
            config,
        }
    }

    /// Wiring and timing
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Observe press, release and click events
    pub fn subscribe(&self) -> Result<EventSubscriber<'_, ButtonEvent>, NotifyError> {
        self.events.subscribe()
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.state.with(|s| s.pressed)
    }

    fn apply_edge(&self, pressed: bool, at: Instant) -> EdgeOutcome {
        let debounce = Duration::from_millis(self.config.debounce_ms as u64);

        self.state.with_mut(|s| {
            if let Some(last) = s.last_edge {
                if at.saturating_duration_since(last) < debounce {
                    return EdgeOutcome::Bounced;
                }
            }
            if pressed == s.pressed {
                return EdgeOutcome::Unchanged;
            }

            s.last_edge = Some(at);
            s.pressed = pressed;
            if pressed {
                s.press_start = at;
                EdgeOutcome::Pressed
            } else {
                EdgeOutcome::Released(at.saturating_duration_since(s.press_start))
            }
        })
    }
}

impl ChangeListener for ButtonTracker {
    fn level_changed(&self, level: bool, at: Instant) {
        let pressed = level == self.config.termination.pressed_level();

        match self.apply_edge(pressed, at) {
            EdgeOutcome::Bounced => debug!("button: bounce dropped"),
            EdgeOutcome::Unchanged => {}
            EdgeOutcome::Pressed => self.events.publish(ButtonEvent::PressStarted),
            EdgeOutcome::Released(held) => {
                let long_press = Duration::from_millis(self.config.long_press_ms as u64);
                if held > long_press {
                    debug!("button: long press ({} ms)", held.as_millis() as u32);
                    self.events.publish(ButtonEvent::LongPressClicked);
                }
                self.events.publish(ButtonEvent::PressEnded);
                self.events.publish(ButtonEvent::Clicked);
            }
        }
    }
}

/// Push button driver
pub struct PushButton<'a, P> {
    port: P,
    tracker: &'a ButtonTracker,
}

impl<'a, P: InterruptPort<'a>> PushButton<'a, P> {
    /// Bind the button to its input port
    ///
    /// The port should be configured with [`resistor_mode`] for the
    /// tracker's termination.
    pub fn new(mut port: P, tracker: &'a ButtonTracker) -> Result<Self, PortFault> {
        port.register_change_listener(tracker)?;
        Ok(Self { port, tracker })
    }

    /// Shared press state (for subscribing to events)
    pub fn tracker(&self) -> &'a ButtonTracker {
        self.tracker
    }
}

impl<'a, P: InterruptPort<'a>> Button for PushButton<'a, P> {
    type Error = PortFault;

    fn is_pressed(&mut self) -> Result<bool, PortFault> {
        let level = self.port.level()?;
        Ok(level == self.tracker.config().termination.pressed_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EdgeLine;

    /// Timestamps in ms
    fn ms(value: u64) -> u64 {
        value * 1_000
    }

    #[test]
    fn test_resistor_modes() {
        assert_eq!(resistor_mode(CircuitTermination::CommonGround), ResistorMode::PullUp);
        assert_eq!(resistor_mode(CircuitTermination::High), ResistorMode::PullDown);
        assert_eq!(resistor_mode(CircuitTermination::Floating), ResistorMode::Disabled);
    }

    #[test]
    fn test_click_active_low() {
        let tracker = ButtonTracker::new(ButtonConfig::default());
        let mut events = tracker.subscribe().unwrap();
        let line = EdgeLine::default();
        line.set_level(true);
        let mut button = PushButton::new(line.port(), &tracker).unwrap();

        assert_eq!(button.is_pressed(), Ok(false));

        line.fire(false, ms(100));
        assert!(tracker.is_pressed());
        assert_eq!(button.is_pressed(), Ok(true));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressStarted));

        line.fire(true, ms(250));
        assert!(!tracker.is_pressed());
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressEnded));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::Clicked));
        assert_eq!(events.try_next_message_pure(), None);
    }

    #[test]
    fn test_long_press() {
        let tracker = ButtonTracker::new(ButtonConfig::with_termination(CircuitTermination::High));
        let mut events = tracker.subscribe().unwrap();
        let line = EdgeLine::default();
        let _button = PushButton::new(line.port(), &tracker).unwrap();

        line.fire(true, ms(1_000));
        line.fire(false, ms(1_600));

        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressStarted));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::LongPressClicked));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressEnded));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::Clicked));
    }

    #[test]
    fn test_exact_threshold_is_short() {
        let tracker = ButtonTracker::new(ButtonConfig::with_termination(CircuitTermination::High));
        let mut events = tracker.subscribe().unwrap();

        tracker.level_changed(true, Instant::from_micros(ms(0)));
        tracker.level_changed(false, Instant::from_micros(ms(500)));

        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressStarted));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressEnded));
    }

    #[test]
    fn test_bounce_dropped() {
        let tracker = ButtonTracker::new(ButtonConfig::with_termination(CircuitTermination::High));
        let mut events = tracker.subscribe().unwrap();

        tracker.level_changed(true, Instant::from_micros(ms(100)));
        // Contact chatter inside the 20 ms window
        tracker.level_changed(false, Instant::from_micros(ms(105)));
        tracker.level_changed(true, Instant::from_micros(ms(110)));
        assert!(tracker.is_pressed());

        tracker.level_changed(false, Instant::from_micros(ms(300)));

        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressStarted));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::PressEnded));
        assert_eq!(events.try_next_message_pure(), Some(ButtonEvent::Clicked));
        assert_eq!(events.try_next_message_pure(), None);
    }

    #[test]
    fn test_release_without_press_ignored() {
        let tracker = ButtonTracker::new(ButtonConfig::default());
        let mut events = tracker.subscribe().unwrap();

        // Active low: high is "released"
        tracker.level_changed(true, Instant::from_micros(ms(10)));
        tracker.level_changed(true, Instant::from_micros(ms(50)));

        assert!(!tracker.is_pressed());
        assert_eq!(events.try_next_message_pure(), None);
    }

    #[test]
    fn test_floating_is_active_low() {
        let tracker = ButtonTracker::new(ButtonConfig::with_termination(CircuitTermination::Floating));

        tracker.level_changed(false, Instant::from_micros(ms(10)));
        assert!(tracker.is_pressed());
    }

    #[test]
    fn test_read_fault() {
        let tracker = ButtonTracker::new(ButtonConfig::default());
        let line = EdgeLine::default();
        let mut button = PushButton::new(line.port(), &tracker).unwrap();

        line.fail_reads(true);
        assert_eq!(button.is_pressed(), Err(PortFault::ReadFailed));
        assert!(core::ptr::eq(button.tracker(), &tracker));
    }
}
