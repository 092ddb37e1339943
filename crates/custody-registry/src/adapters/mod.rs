//! Adapters for the Custody Registry

pub mod bus_sink;
pub mod memory_store;

pub use bus_sink::{BusNotificationSink, RecordingSink};
pub use memory_store::InMemoryCustodyStore;
