//! Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{ManufacturerRecord, ProductRecord};
use crate::domain::errors::RegistryError;
use shared_bus::CustodyEvent;
use shared_types::{AccountId, ProductCode};
use std::sync::Arc;

/// Logical record storage.
///
/// Each `put_*` is a single write of a fully validated record; a failed put
/// must leave the previous record in place.
pub trait CustodyStore: Send + Sync {
    fn get_manufacturer(
        &self,
        representative_id: &AccountId,
    ) -> Result<Option<ManufacturerRecord>, RegistryError>;

    /// Insert or overwrite. A new representative is appended to the
    /// enrollment order; an existing one keeps its position.
    fn put_manufacturer(&self, record: ManufacturerRecord) -> Result<(), RegistryError>;

    fn manufacturer_at(&self, index: usize) -> Result<Option<ManufacturerRecord>, RegistryError>;

    fn manufacturer_count(&self) -> Result<usize, RegistryError>;

    fn get_product(&self, product_code: &ProductCode)
        -> Result<Option<ProductRecord>, RegistryError>;

    fn put_product(&self, record: ProductRecord) -> Result<(), RegistryError>;

    fn product_count(&self) -> Result<usize, RegistryError>;
}

impl<S: CustodyStore + ?Sized> CustodyStore for Arc<S> {
    fn get_manufacturer(
        &self,
        representative_id: &AccountId,
    ) -> Result<Option<ManufacturerRecord>, RegistryError> {
        S::get_manufacturer(self, representative_id)
    }

    fn put_manufacturer(&self, record: ManufacturerRecord) -> Result<(), RegistryError> {
        S::put_manufacturer(self, record)
    }

    fn manufacturer_at(&self, index: usize) -> Result<Option<ManufacturerRecord>, RegistryError> {
        S::manufacturer_at(self, index)
    }

    fn manufacturer_count(&self) -> Result<usize, RegistryError> {
        S::manufacturer_count(self)
    }

    fn get_product(
        &self,
        product_code: &ProductCode,
    ) -> Result<Option<ProductRecord>, RegistryError> {
        S::get_product(self, product_code)
    }

    fn put_product(&self, record: ProductRecord) -> Result<(), RegistryError> {
        S::put_product(self, record)
    }

    fn product_count(&self) -> Result<usize, RegistryError> {
        S::product_count(self)
    }
}

/// Receiver of committed-state notifications.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, event: CustodyEvent);
}
