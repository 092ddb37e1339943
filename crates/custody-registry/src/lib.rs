//! # Custody Registry
//!
//! Tracks custody of individually identified goods: who may enroll
//! manufacturers, who may register goods, and who may ship or accept them.
//!
//! ## Architecture
//!
//! - **Domain**: Records, transition rules, invariants, per-key locks
//! - **Ports**: Inbound (`CustodyRegistryApi`) and Outbound (`CustodyStore`, `NotificationSink`)
//! - **Adapters**: In-memory store, event bus sink
//! - **Application**: Service orchestration
//! - **IPC**: Request/response handler
//!
//! ## Product state machine
//!
//! ```text
//!   enroll_product        ship_product          receive_product
//! ──────────────▶ Created ────────────▶ Shipped ───────────────▶ Owned
//!                                          ▲                       │
//!                                          └────── ship_product ───┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod metrics;
pub mod ports;

pub use adapters::{BusNotificationSink, InMemoryCustodyStore, RecordingSink};
pub use application::{CustodyRegistryService, RegistryStats};
pub use config::RegistryConfig;
pub use domain::entities::*;
pub use domain::errors::{ErrorKind, RecordRef, RegistryError};
pub use ipc::{RegistryHandler, RegistryReply, RegistryRequest, RegistryResponse};
pub use ports::inbound::{CustodyRegistryApi, OperationReceipt};
pub use ports::outbound::{CustodyStore, NotificationSink};
