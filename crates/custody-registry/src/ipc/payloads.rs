//! IPC Payloads for the Custody Registry
//!
//! ## Security (Envelope-Only Identity)
//!
//! Payloads contain NO caller identity fields. The caller is taken solely
//! from the `AuthenticatedRequest` envelope.
//!
//! ## Wire conventions
//!
//! - Accounts are `0x`-prefixed hex.
//! - Company names travel in fixed-width form: 32 bytes, zero padded,
//!   as `0x`-prefixed hex.
//! - An absent recipient is the zero account.

use crate::domain::entities::{ManufacturerRecord, ProductRecord};
use crate::domain::errors::{ErrorKind, RegistryError};
use serde::{Deserialize, Serialize};
use shared_bus::{CustodyEvent, ProductStatusEvent};
use shared_types::{to_bytes32_hex, AccountId, CodecError, ProductStatus};
use uuid::Uuid;

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Every operation the registry serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum RegistryRequest {
    /// Administrator only.
    EnrollManufacturer {
        representative_id: AccountId,
        company_prefix: String,
        /// bytes32 hex
        company_name: String,
        validity_duration_ms: u64,
    },
    /// Enrolled representatives only.
    EnrollProduct { product_code: String },
    /// Current owner only.
    ShipProduct {
        product_code: String,
        recipient: AccountId,
    },
    /// Pending recipient only.
    ReceiveProduct { product_code: String },

    GetCurrentOwner { product_code: String },
    GetRecipient { product_code: String },
    GetProductStatus { product_code: String },
    GetManufacturerAddress { product_code: String },
    GetCompanyPrefix { product_code: String },
    GetManufacturerName { product_code: String },
    GetProduct { product_code: String },
    Manufacturers { index: usize },
    Manufacturer { representative_id: AccountId },
}

impl RegistryRequest {
    /// Whether the request changes state (and so needs a caller identity).
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::EnrollManufacturer { .. }
                | Self::EnrollProduct { .. }
                | Self::ShipProduct { .. }
                | Self::ReceiveProduct { .. }
        )
    }

    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::EnrollManufacturer { .. } => "enroll_manufacturer",
            Self::EnrollProduct { .. } => "enroll_product",
            Self::ShipProduct { .. } => "ship_product",
            Self::ReceiveProduct { .. } => "receive_product",
            Self::GetCurrentOwner { .. } => "get_current_owner",
            Self::GetRecipient { .. } => "get_recipient",
            Self::GetProductStatus { .. } => "get_product_status",
            Self::GetManufacturerAddress { .. } => "get_manufacturer_address",
            Self::GetCompanyPrefix { .. } => "get_company_prefix",
            Self::GetManufacturerName { .. } => "get_manufacturer_name",
            Self::GetProduct { .. } => "get_product",
            Self::Manufacturers { .. } => "manufacturers",
            Self::Manufacturer { .. } => "manufacturer",
        }
    }
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Manufacturer record in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerView {
    pub representative_id: AccountId,
    pub company_prefix: String,
    /// bytes32 hex
    pub company_name: String,
    pub validity_duration_ms: u64,
}

impl TryFrom<&ManufacturerRecord> for ManufacturerView {
    type Error = CodecError;

    fn try_from(record: &ManufacturerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            representative_id: record.representative_id,
            company_prefix: record.company_prefix.clone(),
            company_name: to_bytes32_hex(&record.company_name)?,
            validity_duration_ms: u64::try_from(record.validity_duration.as_millis())
                .unwrap_or(u64::MAX),
        })
    }
}

/// Product record in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product_code: String,
    pub manufacturer: AccountId,
    pub current_owner: AccountId,
    /// Zero account when nothing is pending.
    pub recipient: AccountId,
    pub status: ProductStatus,
}

impl From<&ProductRecord> for ProductView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            product_code: record.product_code.to_string(),
            manufacturer: record.manufacturer_ref,
            current_owner: record.current_owner,
            recipient: record.pending_recipient.unwrap_or(AccountId::ZERO),
            status: record.status,
        }
    }
}

/// Successful result of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RegistryReply {
    Manufacturer(ManufacturerView),
    Product(ProductView),
    Account(AccountId),
    Status(ProductStatusEvent),
    Prefix(String),
    /// bytes32 hex
    Name(String),
}

/// Structured failure report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFailure {
    pub kind: ErrorKind,
    pub product_code: Option<String>,
    pub representative_id: Option<AccountId>,
    pub message: String,
}

impl From<&RegistryError> for RegistryFailure {
    fn from(err: &RegistryError) -> Self {
        Self {
            kind: err.kind(),
            product_code: err.product_code().map(ToString::to_string),
            representative_id: err.representative_id(),
            message: err.to_string(),
        }
    }
}

/// Response to a `RegistryRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryResponse {
    /// Correlation ID from the request envelope
    pub correlation_id: Uuid,
    pub success: bool,
    pub reply: Option<RegistryReply>,
    /// Notifications emitted by a committed mutation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CustodyEvent>,
    pub error: Option<RegistryFailure>,
}

impl RegistryResponse {
    pub fn ok(correlation_id: Uuid, reply: RegistryReply, events: Vec<CustodyEvent>) -> Self {
        Self {
            correlation_id,
            success: true,
            reply: Some(reply),
            events,
            error: None,
        }
    }

    pub fn failed(correlation_id: Uuid, err: &RegistryError) -> Self {
        Self {
            correlation_id,
            success: false,
            reply: None,
            events: Vec::new(),
            error: Some(err.into()),
        }
    }
}
