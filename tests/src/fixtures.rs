//! Shared fixtures.

use std::sync::Arc;

use custody_registry::{
    BusNotificationSink, CustodyRegistryService, InMemoryCustodyStore, RegistryConfig,
    RegistryHandler, RegistryRequest, RegistryResponse,
};
use shared_bus::InMemoryEventBus;
use shared_types::{AccountId, AuthenticatedRequest};

pub const ADMIN: AccountId = AccountId::repeat_byte(0xA0);
pub const MAKER: AccountId = AccountId::repeat_byte(0x01);
pub const RETAILER: AccountId = AccountId::repeat_byte(0x02);
pub const CUSTOMER_1: AccountId = AccountId::repeat_byte(0x03);
pub const CUSTOMER_2: AccountId = AccountId::repeat_byte(0x04);
pub const OUTSIDER: AccountId = AccountId::repeat_byte(0x0F);

pub type Registry =
    CustodyRegistryService<InMemoryCustodyStore, BusNotificationSink<Arc<InMemoryEventBus>>>;

/// A registry, its bus and a handler in front of it.
pub struct TestRegistry {
    pub bus: Arc<InMemoryEventBus>,
    pub registry: Arc<Registry>,
    pub handler: RegistryHandler<Registry>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(CustodyRegistryService::with_config(
            ADMIN,
            config,
            InMemoryCustodyStore::new(),
            BusNotificationSink::new(Arc::clone(&bus)),
        ));
        let handler = RegistryHandler::new(Arc::clone(&registry));
        Self {
            bus,
            registry,
            handler,
        }
    }

    /// Send one request as `caller`.
    pub fn call(&self, caller: AccountId, request: RegistryRequest) -> RegistryResponse {
        self.handler.handle(AuthenticatedRequest::new(caller, request))
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}
