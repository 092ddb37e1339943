//! # Custody Events
//!
//! Defines all notifications that flow through the shared bus. Every
//! state-changing registry operation publishes one or more of these after it
//! commits, carrying the operation's resulting data.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, ProductCode, ProductStatus};
use std::time::Duration;

/// Status snapshot of a product, as published after shipment and receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStatusEvent {
    pub product_code: ProductCode,
    pub status: ProductStatus,
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyEvent {
    // =========================================================================
    // ADMINISTRATION
    // =========================================================================
    /// A manufacturer representative was enrolled by the administrator.
    ManufacturerCreated {
        representative_id: AccountId,
        company_prefix: String,
        company_name: String,
        validity_duration: Duration,
    },

    // =========================================================================
    // PRODUCT LIFECYCLE
    // =========================================================================
    /// A product was registered; its first owner is the enrolling representative.
    ProductCreated {
        product_code: ProductCode,
        owner: AccountId,
    },

    /// Custody transfer was initiated towards `recipient`.
    ProductShipped {
        product_code: ProductCode,
        sender: AccountId,
        recipient: AccountId,
    },

    /// A product's status changed (`Shipped` or `Owned`).
    ProductStatusChanged(ProductStatusEvent),
}

impl CustodyEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ManufacturerCreated { .. } => EventTopic::Manufacturers,
            Self::ProductCreated { .. } => EventTopic::Products,
            Self::ProductShipped { .. } | Self::ProductStatusChanged(_) => EventTopic::Custody,
        }
    }

    /// The product this event concerns, if any.
    #[must_use]
    pub fn product_code(&self) -> Option<&ProductCode> {
        match self {
            Self::ManufacturerCreated { .. } => None,
            Self::ProductCreated { product_code, .. }
            | Self::ProductShipped { product_code, .. } => Some(product_code),
            Self::ProductStatusChanged(event) => Some(&event.product_code),
        }
    }

    /// Stable event name, as used by audit sinks.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ManufacturerCreated { .. } => "ManufacturerCreated",
            Self::ProductCreated { .. } => "ProductCreated",
            Self::ProductShipped { .. } => "ProductShipped",
            Self::ProductStatusChanged(_) => "ProductStatusEvent",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Manufacturer enrollment.
    Manufacturers,
    /// Product registration.
    Products,
    /// Shipment and receipt.
    Custody,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Restrict to a single product. `None` means every product.
    pub product_code: Option<ProductCode>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            product_code: None,
        }
    }

    /// Create a filter following one product down its custody chain.
    #[must_use]
    pub fn product(product_code: ProductCode) -> Self {
        Self {
            topics: Vec::new(),
            product_code: Some(product_code),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &CustodyEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let product_match = match &self.product_code {
            None => true,
            Some(code) => event.product_code() == Some(code),
        };

        topic_match && product_match
    }
}
