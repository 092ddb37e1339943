//! In-memory implementation of `CustodyStore`.
//!
//! All three tables sit behind one lock so a reader never sees a manufacturer
//! appended to the map but missing from the enrollment order.

use crate::domain::entities::{ManufacturerRecord, ProductRecord};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::CustodyStore;
use parking_lot::RwLock;
use shared_types::{AccountId, ProductCode};
use std::collections::HashMap;

#[derive(Default)]
struct Tables {
    manufacturers: HashMap<AccountId, ManufacturerRecord>,
    manufacturer_order: Vec<AccountId>,
    products: HashMap<ProductCode, ProductRecord>,
}

/// Process-local store. State does not survive a restart.
#[derive(Default)]
pub struct InMemoryCustodyStore {
    tables: RwLock<Tables>,
}

impl InMemoryCustodyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustodyStore for InMemoryCustodyStore {
    fn get_manufacturer(
        &self,
        representative_id: &AccountId,
    ) -> Result<Option<ManufacturerRecord>, RegistryError> {
        Ok(self.tables.read().manufacturers.get(representative_id).cloned())
    }

    fn put_manufacturer(&self, record: ManufacturerRecord) -> Result<(), RegistryError> {
        let mut tables = self.tables.write();
        let id = record.representative_id;
        if tables.manufacturers.insert(id, record).is_none() {
            tables.manufacturer_order.push(id);
        }
        Ok(())
    }

    fn manufacturer_at(&self, index: usize) -> Result<Option<ManufacturerRecord>, RegistryError> {
        let tables = self.tables.read();
        Ok(tables
            .manufacturer_order
            .get(index)
            .and_then(|id| tables.manufacturers.get(id))
            .cloned())
    }

    fn manufacturer_count(&self) -> Result<usize, RegistryError> {
        Ok(self.tables.read().manufacturer_order.len())
    }

    fn get_product(
        &self,
        product_code: &ProductCode,
    ) -> Result<Option<ProductRecord>, RegistryError> {
        Ok(self.tables.read().products.get(product_code).cloned())
    }

    fn put_product(&self, record: ProductRecord) -> Result<(), RegistryError> {
        self.tables
            .write()
            .products
            .insert(record.product_code.clone(), record);
        Ok(())
    }

    fn product_count(&self) -> Result<usize, RegistryError> {
        Ok(self.tables.read().products.len())
    }
}
