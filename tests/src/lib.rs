//! # Custody Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Accounts and a registry wired to a live bus
//! ├── integration/      # End-to-end custody scenarios over the request handler
//! └── properties/       # Property checks over random operation sequences
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p custody-tests
//!
//! # By category
//! cargo test -p custody-tests integration::
//! cargo test -p custody-tests properties::
//!
//! # Benchmarks
//! cargo bench -p custody-tests
//! ```

pub mod fixtures;
pub mod integration;
pub mod properties;
