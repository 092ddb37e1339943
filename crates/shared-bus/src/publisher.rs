//! # Publishing Side
//!
//! The registry publishes through [`EventPublisher`]; observers attach to an
//! [`InMemoryEventBus`] with a filter.

use crate::events::{CustodyEvent, EventFilter};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Anything that can carry a custody notification to observers.
///
/// `publish` is synchronous and infallible so a registry operation can emit
/// while it still holds its record lock.
pub trait EventPublisher: Send + Sync {
    /// Hand `event` to every current subscriber. Returns how many there were.
    fn publish(&self, event: CustodyEvent) -> usize;

    /// Events handed to `publish` so far, delivered or not.
    fn events_published(&self) -> u64;
}

impl<P: EventPublisher + ?Sized> EventPublisher for Arc<P> {
    fn publish(&self, event: CustodyEvent) -> usize {
        P::publish(self, event)
    }

    fn events_published(&self) -> u64 {
        P::events_published(self)
    }
}

/// Single-process bus on top of `tokio::sync::broadcast`.
///
/// Every subscriber sees every event in publish order; filtering happens on
/// the receiving side. A subscriber more than `capacity` events behind
/// loses the oldest ones.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<CustodyEvent>,
    capacity: usize,
    published: AtomicU64,
    /// Published while nobody was listening.
    unobserved: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// `capacity` is the per-subscriber backlog and must be non-zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            capacity,
            published: AtomicU64::new(0),
            unobserved: AtomicU64::new(0),
        }
    }

    /// Attach a subscriber. It sees events published after this call.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            topics = ?filter.topics,
            product = ?filter.product_code,
            subscribers = self.sender.receiver_count() + 1,
            "Subscriber attached"
        );
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Same as [`subscribe`](Self::subscribe), as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events that found no subscriber at all.
    #[must_use]
    pub fn events_unobserved(&self) -> u64 {
        self.unobserved.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: CustodyEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let name = event.name();
        let product = event.product_code().map(ToString::to_string);

        // `send` only fails when there are no receivers.
        let delivered = self.sender.send(event).unwrap_or_else(|_| {
            self.unobserved.fetch_add(1, Ordering::Relaxed);
            0
        });
        trace!(event = name, ?product, subscribers = delivered, "Notification published");
        delivered
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
