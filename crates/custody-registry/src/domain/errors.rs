//! Error types for the Custody Registry
//!
//! Every failure carries the identifiers involved so callers can report
//! which product or representative was rejected.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, CodecError, EnvelopeError, IdentifierError, ProductCode};
use std::fmt;
use thiserror::Error;

/// The record a lookup or insert referred to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Product(ProductCode),
    Manufacturer(AccountId),
    ManufacturerIndex(usize),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(code) => write!(f, "product {}", code),
            Self::Manufacturer(id) => write!(f, "manufacturer {}", id),
            Self::ManufacturerIndex(index) => write!(f, "manufacturer index {}", index),
        }
    }
}

/// All errors that can occur in the custody registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the administrator.
    #[error("Unauthorized: caller {caller} is not the administrator")]
    Unauthorized { caller: AccountId },

    /// Caller has no manufacturer record and cannot register products.
    #[error("Manufacturer Doesnt Exist: {caller} is not an enrolled representative")]
    ManufacturerNotFound { caller: AccountId },

    /// Caller does not currently hold the product, or it is in transit.
    #[error("Not owner: {caller} does not hold product {product_code}")]
    NotOwner {
        product_code: ProductCode,
        caller: AccountId,
    },

    /// Caller is not the pending recipient of the product.
    #[error("The product wasn't meant for the sender: {caller} cannot receive {product_code}")]
    NotIntendedRecipient {
        product_code: ProductCode,
        caller: AccountId,
    },

    /// No record for the referenced key.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordRef),

    /// A record with the same key is already registered.
    #[error("Already exists: {0}")]
    AlreadyExists(RecordRef),

    /// Malformed request data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The record stayed locked past the configured bound.
    #[error("Timed out waiting for {0}")]
    Timeout(RecordRef),

    /// Storage or other unexpected fault. Nothing was committed.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire-level classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unauthorized,
    ManufacturerNotFound,
    NotOwner,
    NotIntendedRecipient,
    RecordNotFound,
    AlreadyExists,
    InvalidInput,
    Timeout,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::ManufacturerNotFound => "manufacturer_not_found",
            Self::NotOwner => "not_owner",
            Self::NotIntendedRecipient => "not_intended_recipient",
            Self::RecordNotFound => "record_not_found",
            Self::AlreadyExists => "already_exists",
            Self::InvalidInput => "invalid_input",
            Self::Timeout => "timeout",
            Self::Internal => "internal",
        }
    }
}

impl RegistryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ManufacturerNotFound { .. } => ErrorKind::ManufacturerNotFound,
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::NotIntendedRecipient { .. } => ErrorKind::NotIntendedRecipient,
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The product involved in the failure, if any.
    #[must_use]
    pub fn product_code(&self) -> Option<&ProductCode> {
        match self {
            Self::NotOwner { product_code, .. }
            | Self::NotIntendedRecipient { product_code, .. } => Some(product_code),
            Self::RecordNotFound(RecordRef::Product(code))
            | Self::AlreadyExists(RecordRef::Product(code))
            | Self::Timeout(RecordRef::Product(code)) => Some(code),
            _ => None,
        }
    }

    /// The representative or caller involved in the failure, if any.
    #[must_use]
    pub fn representative_id(&self) -> Option<AccountId> {
        match self {
            Self::Unauthorized { caller }
            | Self::ManufacturerNotFound { caller }
            | Self::NotOwner { caller, .. }
            | Self::NotIntendedRecipient { caller, .. } => Some(*caller),
            Self::RecordNotFound(RecordRef::Manufacturer(id))
            | Self::AlreadyExists(RecordRef::Manufacturer(id))
            | Self::Timeout(RecordRef::Manufacturer(id)) => Some(*id),
            _ => None,
        }
    }
}

impl From<CodecError> for RegistryError {
    fn from(err: CodecError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<IdentifierError> for RegistryError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<EnvelopeError> for RegistryError {
    fn from(err: EnvelopeError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
