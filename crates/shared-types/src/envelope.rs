//! # `AuthenticatedRequest` Envelope
//!
//! The wrapper for every request delivered to the custody registry.
//!
//! ## Security Properties
//!
//! - **Versioning**: All requests include a `version` field for forward compatibility.
//! - **Correlation**: Responses echo the request's `correlation_id`.
//! - **Envelope Authority**: The `caller` is the sole source of truth for identity.
//!   It is populated by the identity provider after authenticating the request;
//!   the registry never reads identity from a payload.

use crate::entities::AccountId;
use crate::errors::EnvelopeError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// The universal request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedRequest<T> {
    /// Protocol version for forward compatibility.
    pub version: u16,

    /// The authenticated account issuing the request.
    pub caller: AccountId,

    /// Unique identifier for correlating request/response pairs.
    pub correlation_id: Uuid,

    /// Unix timestamp (seconds) when the request was created.
    pub timestamp: u64,

    /// The request payload.
    pub payload: T,
}

impl<T> AuthenticatedRequest<T> {
    /// Current protocol version.
    pub const CURRENT_VERSION: u16 = 1;

    /// Wrap `payload` for `caller` with a fresh correlation id.
    pub fn new(caller: AccountId, payload: T) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            caller,
            correlation_id: Uuid::new_v4(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            payload,
        }
    }

    /// Check only the protocol version. Enough for read-only requests,
    /// which need no identity.
    pub fn verify_version(&self) -> Result<(), EnvelopeError> {
        if self.version != Self::CURRENT_VERSION {
            return Err(EnvelopeError::UnsupportedVersion {
                received: self.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        Ok(())
    }

    /// Check the envelope header before the payload is looked at.
    pub fn verify(&self) -> Result<(), EnvelopeError> {
        self.verify_version()?;
        if self.caller.is_zero() {
            return Err(EnvelopeError::MissingCaller);
        }
        Ok(())
    }
}
