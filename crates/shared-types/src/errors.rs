//! # Error Types
//!
//! Defines error types shared by the custody crates.

use thiserror::Error;

/// Errors raised while parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Account was not 20 bytes of hex.
    #[error("Invalid account identifier: {0}")]
    InvalidAccount(String),

    /// Product code was empty, too long, or not all digits.
    #[error("Invalid product code: {0:?}")]
    InvalidProductCode(String),
}

/// Errors raised by the fixed-width name codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Content does not fit the fixed width.
    #[error("Name too long: {len} bytes exceeds {max}")]
    TooLong { len: usize, max: usize },

    /// Decoded bytes are not valid UTF-8.
    #[error("Name is not valid UTF-8")]
    InvalidUtf8,

    /// Wire form was not hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

/// Errors related to request envelope verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Envelope version not supported.
    #[error("Unsupported version: received {received}, supported {supported}")]
    UnsupportedVersion { received: u16, supported: u16 },

    /// The reserved empty account cannot act as a caller.
    #[error("Caller identity is missing")]
    MissingCaller,
}
