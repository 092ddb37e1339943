//! # Custody Registry Node
//!
//! Runs the custody registry in a single process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (command line, then environment)
//! 2. Initialize logging
//! 3. Wire store, event bus and registry service
//! 4. Start the audit log subscriber
//! 5. Run the demo flow, or answer JSON requests on stdin
//! 6. Shut down on completion, EOF or Ctrl+C

pub mod config;
pub mod demo;
pub mod runtime;

pub use config::{Cli, ConfigError, NodeConfig};
pub use demo::{run_demo, DemoAccounts, DemoReport};
pub use runtime::{NodeRuntime, Registry};
