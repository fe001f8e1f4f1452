//! Passive infrared motion sensor
//!
//! The module drives its output high while it sees motion and low once the
//! scene is still again; the hold time is set on the module itself.

use perikit_core::notify::{EventHub, EventSubscriber, MotionEvent, NotifyError};
use perikit_core::sync::Shared;
use perikit_core::traits::MotionSensor;
use perikit_hal::{ChangeListener, Instant, InterruptPort, PortFault};

/// Motion state shared with the sensor's input port
pub struct MotionTracker {
    motion: Shared<bool>,
    events: EventHub<MotionEvent>,
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionTracker {
    /// Create a tracker reporting no motion
    pub const fn new() -> Self {
        Self {
            motion: Shared::new(false),
            events: EventHub::new(),
        }
    }

    /// Observe motion start and end
    pub fn subscribe(&self) -> Result<EventSubscriber<'_, MotionEvent>, NotifyError> {
        self.events.subscribe()
    }

    /// Last reported motion state
    pub fn motion_detected(&self) -> bool {
        self.motion.get()
    }
}

impl ChangeListener for MotionTracker {
    fn level_changed(&self, level: bool, _at: Instant) {
        let changed = self.motion.with_mut(|motion| {
            let changed = *motion != level;
            *motion = level;
            changed
        });
        if !changed {
            return;
        }

        let event = if level {
            MotionEvent::Started
        } else {
            MotionEvent::Ended
        };
        debug!("pir: {}", event);
        self.events.publish(event);
    }
}

/// Parallax PIR driver
pub struct ParallaxPir<'a, P> {
    port: P,
    tracker: &'a MotionTracker,
}

impl<'a, P: InterruptPort<'a>> ParallaxPir<'a, P> {
    /// Bind the sensor to its input port
    ///
    /// The tracker is seeded with the current level without publishing.
    pub fn new(mut port: P, tracker: &'a MotionTracker) -> Result<Self, PortFault> {
        tracker.motion.set(port.level()?);
        port.register_change_listener(tracker)?;
        Ok(Self { port, tracker })
    }

    /// Sample the sensor output directly
    pub fn read_level(&mut self) -> Result<bool, PortFault> {
        self.port.level()
    }

    /// Shared motion state (for subscribing to events)
    pub fn tracker(&self) -> &'a MotionTracker {
        self.tracker
    }
}

impl<'a, P: InterruptPort<'a>> MotionSensor for ParallaxPir<'a, P> {
    fn motion_detected(&self) -> bool {
        self.tracker.motion_detected()
    }
}
