//! Domain invariants for the Custody Registry
//!
//! Checked by the service on every record before it is committed.

use super::entities::{ManufacturerRecord, ProductRecord};
use shared_types::ProductStatus;

/// A product is in transit exactly when a recipient is pending.
pub fn invariant_status_matches_recipient(product: &ProductRecord) -> bool {
    match product.status {
        ProductStatus::Shipped => product.pending_recipient.is_some(),
        ProductStatus::Created | ProductStatus::Owned => product.pending_recipient.is_none(),
    }
}

/// Owner and manufacturer are real accounts.
pub fn invariant_accounts_present(product: &ProductRecord) -> bool {
    !product.current_owner.is_zero()
        && !product.manufacturer_ref.is_zero()
        && product.pending_recipient.map_or(true, |r| !r.is_zero())
}

/// A `Created` product has never left its manufacturer.
pub fn invariant_created_held_by_manufacturer(product: &ProductRecord) -> bool {
    product.status != ProductStatus::Created || product.current_owner == product.manufacturer_ref
}

/// A product may only be created under an existing manufacturer record.
pub fn invariant_manufacturer_backs_product(
    product: &ProductRecord,
    manufacturer: Option<&ManufacturerRecord>,
) -> bool {
    manufacturer.is_some_and(|m| m.representative_id == product.manufacturer_ref)
}

/// All record-local invariants.
pub fn check_product(product: &ProductRecord) -> Result<(), &'static str> {
    if !invariant_status_matches_recipient(product) {
        return Err("status and pending recipient disagree");
    }
    if !invariant_accounts_present(product) {
        return Err("zero account in product record");
    }
    if !invariant_created_held_by_manufacturer(product) {
        return Err("created product held by a non-manufacturer");
    }
    Ok(())
}
