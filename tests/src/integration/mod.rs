//! # Integration Tests
//!
//! End-to-end custody scenarios driven through the request handler,
//! notification delivery over the shared bus, and a running node session.

pub mod bus_delivery;
pub mod custody_scenarios;
pub mod node_session;
