//! # Registry Metrics
//!
//! Prometheus counters for registry operations.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! custody-registry = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `custody_operations_total` - Operations by name and outcome (`committed` or an error kind)
//! - `custody_events_published_total` - Notifications handed to the sink
//! - `custody_lock_timeouts_total` - Operations that gave up waiting for a record
//! - `custody_products_registered` - Gauge of registered products

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Operations, labeled by operation and outcome
    pub static ref OPERATIONS: IntCounterVec = register_int_counter_vec!(
        "custody_operations_total",
        "Total number of registry operations",
        &["operation", "outcome"]
    )
    .expect("Failed to create OPERATIONS metric");

    /// Notifications published
    pub static ref EVENTS_PUBLISHED: IntCounter = register_int_counter!(
        "custody_events_published_total",
        "Total number of custody notifications published"
    )
    .expect("Failed to create EVENTS_PUBLISHED metric");

    /// Lock acquisition timeouts
    pub static ref LOCK_TIMEOUTS: IntCounter = register_int_counter!(
        "custody_lock_timeouts_total",
        "Total number of operations that timed out waiting for a record"
    )
    .expect("Failed to create LOCK_TIMEOUTS metric");

    /// Registered products
    pub static ref PRODUCTS_REGISTERED: IntGauge = register_int_gauge!(
        "custody_products_registered",
        "Number of registered products"
    )
    .expect("Failed to create PRODUCTS_REGISTERED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an operation outcome
#[cfg(feature = "metrics")]
pub fn record_operation(operation: &str, outcome: &str) {
    OPERATIONS.with_label_values(&[operation, outcome]).inc();
}

/// Record a published notification
#[cfg(feature = "metrics")]
pub fn record_event_published() {
    EVENTS_PUBLISHED.inc();
}

/// Record a lock timeout
#[cfg(feature = "metrics")]
pub fn record_lock_timeout() {
    LOCK_TIMEOUTS.inc();
}

#[cfg(feature = "metrics")]
pub fn set_products_registered(count: usize) {
    PRODUCTS_REGISTERED.set(count as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_operation(_operation: &str, _outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_event_published() {}

#[cfg(not(feature = "metrics"))]
pub fn record_lock_timeout() {}

#[cfg(not(feature = "metrics"))]
pub fn set_products_registered(_count: usize) {}
