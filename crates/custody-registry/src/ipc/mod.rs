//! IPC Module for the Custody Registry
//!
//! Request/response surface: an `AuthenticatedRequest<RegistryRequest>` in,
//! a `RegistryResponse` out, JSON on the wire.

pub mod handler;
pub mod payloads;

pub use handler::RegistryHandler;
pub use payloads::*;
