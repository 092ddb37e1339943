//! Ports layer for the Custody Registry
//!
//! Defines the inbound API and the outbound storage/notification traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{CustodyRegistryApi, OperationReceipt};
pub use outbound::{CustodyStore, NotificationSink};
