//! Domain module for the Custody Registry
//!
//! Contains core entities, errors, invariants and per-key locking.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod locks;

pub use entities::*;
pub use errors::*;
pub use locks::{KeyGuard, KeyLocks, LockKey};
