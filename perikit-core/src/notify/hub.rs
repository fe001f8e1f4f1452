//! Publish/subscribe hub for driver events

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pubsub::{PubSubChannel, Subscriber};

/// Events buffered per observer before the oldest is dropped
pub const EVENT_QUEUE_DEPTH: usize = 4;

/// Maximum simultaneous observers per hub
pub const MAX_OBSERVERS: usize = 4;

/// Publisher slots (publishing goes through the immediate publisher)
const PUBLISHERS: usize = 1;

type Channel<T> =
    PubSubChannel<CriticalSectionRawMutex, T, EVENT_QUEUE_DEPTH, MAX_OBSERVERS, PUBLISHERS>;

/// Subscription handle returned by [`EventHub::subscribe`]
///
/// Dropping it releases the observer slot.
pub type EventSubscriber<'a, T> =
    Subscriber<'a, CriticalSectionRawMutex, T, EVENT_QUEUE_DEPTH, MAX_OBSERVERS, PUBLISHERS>;

/// Errors from the notification hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyError {
    /// All observer slots are taken
    ObserverSlotsFull,
}

/// Fan-out of driver events to zero or more observers
///
/// Safe to publish from an edge notification: publishing only takes a
/// critical section and never waits.
pub struct EventHub<T: Clone> {
    channel: Channel<T>,
}

impl<T: Clone> Default for EventHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EventHub<T> {
    /// Create an empty hub
    pub const fn new() -> Self {
        Self {
            channel: PubSubChannel::new(),
        }
    }

    /// Deliver `event` to every current observer
    ///
    /// With no observers the event is discarded.
    pub fn publish(&self, event: T) {
        self.channel.immediate_publisher().publish_immediate(event);
    }

    /// Register a new observer
    pub fn subscribe(&self) -> Result<EventSubscriber<'_, T>, NotifyError> {
        self.channel
            .subscriber()
            .map_err(|_| NotifyError::ObserverSlotsFull)
    }
}
