//! # Shared Types Crate
//!
//! This crate contains the identifiers, the fixed-width name codec and the
//! `AuthenticatedRequest<T>` envelope used by every custody crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Envelope Integrity**: The `AuthenticatedRequest<T>` is the sole carrier
//!   of caller identity for registry requests.
//! - **No Redundant Identity**: Payloads MUST NOT contain caller fields;
//!   the envelope's `caller` is authoritative.

pub mod codec;
pub mod entities;
pub mod envelope;
pub mod errors;

pub use codec::*;
pub use entities::*;
pub use envelope::AuthenticatedRequest;
pub use errors::*;
