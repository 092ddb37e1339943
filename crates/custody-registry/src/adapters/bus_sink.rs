//! Notification sinks.

use crate::ports::outbound::NotificationSink;
use parking_lot::Mutex;
use shared_bus::{CustodyEvent, EventPublisher};
use tracing::trace;

/// Forwards registry notifications to an event bus.
pub struct BusNotificationSink<P> {
    publisher: P,
}

impl<P: EventPublisher> BusNotificationSink<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

impl<P: EventPublisher> NotificationSink for BusNotificationSink<P> {
    fn publish(&self, event: CustodyEvent) {
        let name = event.name();
        let receivers = self.publisher.publish(event);
        trace!(event = name, receivers, "Notification forwarded to bus");
    }
}

/// Keeps every notification in memory, in emission order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CustodyEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<CustodyEvent> {
        self.events.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<CustodyEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn publish(&self, event: CustodyEvent) {
        self.events.lock().push(event);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    fn publish(&self, event: CustodyEvent) {
        (**self).publish(event)
    }
}
