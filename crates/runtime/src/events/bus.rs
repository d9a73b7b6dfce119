//! Topic-based event bus implementation.

use tokio::sync::broadcast;

use super::types::{Event, Topic};

/// Topic-based event bus.
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: an event on a topic
/// without subscribers is simply dropped.
#[derive(Clone)]
pub struct EventBus {
    roster_tx: broadcast::Sender<Event>,
    log_tx: broadcast::Sender<Event>,
    turn_tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the specified capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            roster_tx: broadcast::channel(capacity).0,
            log_tx: broadcast::channel(capacity).0,
            turn_tx: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Roster => &self.roster_tx,
            Topic::Log => &self.log_tx,
            Topic::Turn => &self.turn_tx,
        }
    }

    /// Publishes an event to its corresponding topic.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("no subscribers for topic {:?}", topic);
        }
    }

    /// Subscribes to a specific topic.
    ///
    /// Returns a receiver that will only see events for that topic,
    /// starting from the moment of subscription.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
