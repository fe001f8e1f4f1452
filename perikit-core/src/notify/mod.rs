//! Driver notifications
//!
//! Each event-producing driver publishes into an [`EventHub`]; applications
//! subscribe to receive events. Publishing never blocks: when an observer
//! falls behind, its oldest pending events are dropped.

pub mod events;
pub mod hub;

pub use events::{ButtonEvent, DistanceEvent, MoistureChange, MotionEvent};
pub use hub::{EventHub, EventSubscriber, NotifyError, EVENT_QUEUE_DEPTH, MAX_OBSERVERS};
