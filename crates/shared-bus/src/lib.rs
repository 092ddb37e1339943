//! # Shared Bus - Notification Channel for Custody Events
//!
//! Every state-changing registry operation publishes its result here for
//! external observers (dashboards, audit logs).
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Custody Registry │                    │  Audit Log   │
//! │                  │    publish()       │              │
//! │                  │ ──────┐            │              │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Publishing never blocks and never fails the publishing operation: an event
//! with no subscribers is counted and dropped.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{CustodyEvent, EventFilter, EventTopic, ProductStatusEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
