//! # Custody Telemetry
//!
//! Logging bootstrap for the custody registry node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custody_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CUSTODY_SERVICE_NAME` | `custody-registry` | Service name in logs |
//! | `CUSTODY_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CUSTODY_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CUSTODY_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
