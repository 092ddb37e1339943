//! Application layer for the Custody Registry

pub mod service;

pub use service::{CustodyRegistryService, RegistryStats};
