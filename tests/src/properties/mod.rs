//! # Property Checks
//!
//! Random operation sequences over a handful of accounts and products.
//! After every step the gating rules and the status/recipient coupling must
//! hold, and a rejected step must leave the record exactly as it was.

pub mod custody_properties;
