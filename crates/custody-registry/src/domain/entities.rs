//! Core entities for the Custody Registry
//!
//! `ProductRecord` owns its transition rules; the service only decides
//! *whether* a transition is attempted and persists the outcome.

use super::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_bus::ProductStatusEvent;
use shared_types::{AccountId, ProductCode, ProductStatus};
use std::time::Duration;

/// An authorized manufacturer representative and the company it acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerRecord {
    /// The only account allowed to register products for this company.
    pub representative_id: AccountId,
    /// GS1-style company prefix.
    pub company_prefix: String,
    /// Company name, stored decoded. At most 32 bytes so it fits the wire form.
    pub company_name: String,
    /// Accepted at enrollment and kept; no operation enforces expiry.
    pub validity_duration: Duration,
}

/// Input of an `enroll_manufacturer` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerEnrollment {
    pub representative_id: AccountId,
    pub company_prefix: String,
    pub company_name: String,
    pub validity_duration: Duration,
}

impl ManufacturerEnrollment {
    pub fn new(
        representative_id: AccountId,
        company_prefix: impl Into<String>,
        company_name: impl Into<String>,
        validity_duration: Duration,
    ) -> Self {
        Self {
            representative_id,
            company_prefix: company_prefix.into(),
            company_name: company_name.into(),
            validity_duration,
        }
    }

    /// Build the record this enrollment creates.
    pub fn into_record(self) -> ManufacturerRecord {
        ManufacturerRecord {
            representative_id: self.representative_id,
            company_prefix: self.company_prefix,
            company_name: self.company_name,
            validity_duration: self.validity_duration,
        }
    }
}

/// A registered good and its custody state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_code: ProductCode,
    /// Representative that registered the product.
    pub manufacturer_ref: AccountId,
    pub current_owner: AccountId,
    /// Set only while `status == Shipped`.
    pub pending_recipient: Option<AccountId>,
    pub status: ProductStatus,
}

impl ProductRecord {
    /// A freshly registered product, held by its manufacturer.
    pub fn new(product_code: ProductCode, manufacturer: AccountId) -> Self {
        Self {
            product_code,
            manufacturer_ref: manufacturer,
            current_owner: manufacturer,
            pending_recipient: None,
            status: ProductStatus::Created,
        }
    }

    /// Start a custody transfer to `recipient`.
    ///
    /// Only the current owner of an item at rest may ship. While a shipment
    /// is pending nobody holds the item, so every ship is a stale-owner
    /// failure until the recipient accepts it.
    pub fn ship(&mut self, caller: AccountId, recipient: AccountId) -> Result<(), RegistryError> {
        if caller != self.current_owner || self.status == ProductStatus::Shipped {
            return Err(RegistryError::NotOwner {
                product_code: self.product_code.clone(),
                caller,
            });
        }
        if recipient.is_zero() {
            return Err(RegistryError::InvalidInput(
                "recipient must not be the zero account".into(),
            ));
        }
        self.pending_recipient = Some(recipient);
        self.status = ProductStatus::Shipped;
        Ok(())
    }

    /// Accept custody. Only the pending recipient may receive.
    pub fn receive(&mut self, caller: AccountId) -> Result<(), RegistryError> {
        if self.pending_recipient != Some(caller) {
            return Err(RegistryError::NotIntendedRecipient {
                product_code: self.product_code.clone(),
                caller,
            });
        }
        self.current_owner = caller;
        self.pending_recipient = None;
        self.status = ProductStatus::Owned;
        Ok(())
    }

    /// Status data in the shape published on the bus.
    #[must_use]
    pub fn status_event(&self) -> ProductStatusEvent {
        ProductStatusEvent {
            product_code: self.product_code.clone(),
            status: self.status,
        }
    }
}
