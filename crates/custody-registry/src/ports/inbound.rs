//! Inbound Ports (Driving Ports / API)
//!
//! The caller of every mutating operation is the identity taken from the
//! request envelope; it is never read from the operation's own arguments.

use crate::domain::entities::{ManufacturerEnrollment, ManufacturerRecord, ProductRecord};
use crate::domain::errors::RegistryError;
use shared_bus::{CustodyEvent, ProductStatusEvent};
use shared_types::{AccountId, ProductCode};

/// Result of a committed state change: the record as stored plus every
/// notification emitted for it, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationReceipt<T> {
    pub record: T,
    pub events: Vec<CustodyEvent>,
}

/// Primary Custody Registry API
pub trait CustodyRegistryApi: Send + Sync {
    /// Create a manufacturer record. Administrator only.
    fn enroll_manufacturer(
        &self,
        caller: AccountId,
        enrollment: ManufacturerEnrollment,
    ) -> Result<OperationReceipt<ManufacturerRecord>, RegistryError>;

    /// Register a product under the calling representative.
    fn enroll_product(
        &self,
        caller: AccountId,
        product_code: ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError>;

    /// Hand a product to `recipient`. Current owner only.
    fn ship_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
        recipient: AccountId,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError>;

    /// Accept custody of a shipped product. Pending recipient only.
    fn receive_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError>;

    /// Fails with `Unauthorized` unless `caller` may enroll manufacturers.
    /// A rejection counts as a rejected `enroll_manufacturer`.
    fn authorize_enrollment(&self, caller: AccountId) -> Result<(), RegistryError>;

    /// Fails with `ManufacturerNotFound` unless `caller` may register
    /// products. A rejection counts as a rejected `enroll_product`.
    fn authorize_product_registration(&self, caller: AccountId) -> Result<(), RegistryError>;

    // Queries. None of these require authorization or change state.

    fn get_current_owner(&self, product_code: &ProductCode) -> Result<AccountId, RegistryError>;

    /// `None` when no shipment is pending.
    fn get_recipient(&self, product_code: &ProductCode)
        -> Result<Option<AccountId>, RegistryError>;

    /// Current status in event form. Does not publish anything.
    fn get_product_status(
        &self,
        product_code: &ProductCode,
    ) -> Result<ProductStatusEvent, RegistryError>;

    /// The representative that registered the product.
    fn get_manufacturer_address(
        &self,
        product_code: &ProductCode,
    ) -> Result<AccountId, RegistryError>;

    fn get_company_prefix(&self, product_code: &ProductCode) -> Result<String, RegistryError>;

    fn get_manufacturer_name(&self, product_code: &ProductCode) -> Result<String, RegistryError>;

    fn get_product(&self, product_code: &ProductCode) -> Result<ProductRecord, RegistryError>;

    /// Manufacturer by enrollment order.
    fn manufacturers(&self, index: usize) -> Result<ManufacturerRecord, RegistryError>;

    /// Manufacturer by representative.
    fn manufacturer(&self, representative_id: &AccountId)
        -> Result<ManufacturerRecord, RegistryError>;
}
