//! Node configuration.
//!
//! Every option can come from the command line or the environment; the
//! command line wins.

use clap::Parser;
use custody_registry::RegistryConfig;
use shared_types::AccountId;
use std::time::Duration;
use thiserror::Error;

/// Administrator used by the demo when none is configured.
pub const DEMO_ADMIN: AccountId = AccountId::repeat_byte(0xAD);

/// Command line / environment options.
#[derive(Debug, Clone, Parser)]
#[command(name = "registry-node", about = "Custody registry node")]
pub struct Cli {
    /// Administrator account (0x-prefixed hex)
    #[arg(long, env = "CUSTODY_ADMIN")]
    pub admin: Option<AccountId>,

    /// Upper bound on waiting for a busy record, in milliseconds
    #[arg(long, env = "CUSTODY_LOCK_TIMEOUT_MS", default_value_t = 5_000)]
    pub lock_timeout_ms: u64,

    /// Let the administrator overwrite an enrolled manufacturer
    #[arg(long, env = "CUSTODY_ALLOW_REENROLL")]
    pub allow_reenroll: bool,

    /// Run the demo custody flow and exit
    #[arg(long, env = "CUSTODY_DEMO")]
    pub demo: bool,

    /// Buffered notifications per bus subscriber
    #[arg(
        long,
        env = "CUSTODY_EVENT_CAPACITY",
        default_value_t = shared_bus::DEFAULT_CHANNEL_CAPACITY
    )]
    pub event_capacity: usize,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No administrator and not running the demo.
    #[error("CUSTODY_ADMIN is required unless --demo is set")]
    MissingAdmin,

    /// The zero account cannot administer anything.
    #[error("administrator must not be the zero account")]
    ZeroAdmin,

    #[error("event capacity must be positive")]
    ZeroCapacity,
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub admin: AccountId,
    pub registry: RegistryConfig,
    pub demo: bool,
    pub event_capacity: usize,
}

impl NodeConfig {
    /// Parse from process arguments and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Cli::parse().try_into()
    }
}

impl TryFrom<Cli> for NodeConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let admin = match (cli.admin, cli.demo) {
            (Some(admin), _) => admin,
            (None, true) => DEMO_ADMIN,
            (None, false) => return Err(ConfigError::MissingAdmin),
        };
        if admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        if cli.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(Self {
            admin,
            registry: RegistryConfig::default()
                .with_lock_timeout(Duration::from_millis(cli.lock_timeout_ms))
                .with_reenrollment(cli.allow_reenroll),
            demo: cli.demo,
            event_capacity: cli.event_capacity,
        })
    }
}
