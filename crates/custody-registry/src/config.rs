//! Configuration for the Custody Registry

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Registry configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Upper bound on waiting for a product or representative that another
    /// operation is currently mutating.
    pub lock_timeout: Duration,
    /// Let the administrator overwrite an existing manufacturer record.
    /// The record keeps its original enrollment index.
    pub allow_manufacturer_reenrollment: bool,
}

impl RegistryConfig {
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn with_reenrollment(mut self, allow: bool) -> Self {
        self.allow_manufacturer_reenrollment = allow;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            allow_manufacturer_reenrollment: false,
        }
    }
}
