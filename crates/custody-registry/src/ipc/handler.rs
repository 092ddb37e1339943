//! IPC Handler for the Custody Registry
//!
//! ## Security Boundaries
//!
//! - Mutations MUST carry a non-zero caller in the envelope
//! - Queries only need a supported envelope version
//! - Authorization itself (admin, owner, recipient) is decided by the service

use crate::domain::entities::ManufacturerEnrollment;
use crate::domain::errors::RegistryError;
use crate::ipc::payloads::{
    ManufacturerView, ProductView, RegistryReply, RegistryRequest, RegistryResponse,
};
use crate::ports::inbound::CustodyRegistryApi;
use shared_bus::CustodyEvent;
use shared_types::{from_bytes32_hex, AccountId, AuthenticatedRequest, ProductCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Translates wire requests into registry calls.
pub struct RegistryHandler<A> {
    registry: Arc<A>,
}

impl<A> Clone for RegistryHandler<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: CustodyRegistryApi> RegistryHandler<A> {
    pub fn new(registry: Arc<A>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<A> {
        &self.registry
    }

    /// Handle one request. Never panics; every failure becomes a response.
    pub fn handle(&self, request: AuthenticatedRequest<RegistryRequest>) -> RegistryResponse {
        let correlation_id = request.correlation_id;
        let method = request.payload.method();

        let header = if request.payload.is_mutation() {
            request.verify()
        } else {
            request.verify_version()
        };
        if let Err(e) = header {
            warn!("[registry] Rejected {} envelope: {}", method, e);
            return RegistryResponse::failed(correlation_id, &RegistryError::from(e));
        }

        debug!("[registry] Processing {} from {}", method, request.caller);

        match self.dispatch(request.caller, request.payload) {
            Ok((reply, events)) => {
                if !events.is_empty() {
                    info!(
                        "[registry] {} committed with {} notification(s)",
                        method,
                        events.len()
                    );
                }
                RegistryResponse::ok(correlation_id, reply, events)
            }
            Err(e) => {
                warn!("[registry] {} failed: {}", method, e);
                RegistryResponse::failed(correlation_id, &e)
            }
        }
    }

    /// Handle a JSON-encoded `AuthenticatedRequest<RegistryRequest>`.
    ///
    /// Undecodable input yields a failure response with a nil correlation id.
    pub fn handle_json(&self, raw: &str) -> Result<String, serde_json::Error> {
        let response = match serde_json::from_str::<AuthenticatedRequest<RegistryRequest>>(raw) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!("[registry] Undecodable request: {}", e);
                RegistryResponse::failed(
                    Uuid::nil(),
                    &RegistryError::InvalidInput(format!("malformed request: {}", e)),
                )
            }
        };
        serde_json::to_string(&response)
    }

    fn dispatch(&self, caller: AccountId, request: RegistryRequest) -> Outcome {
        let registry = &self.registry;

        match request {
            RegistryRequest::EnrollManufacturer {
                representative_id,
                company_prefix,
                company_name,
                validity_duration_ms,
            } => {
                // The caller is checked before the payload is decoded.
                registry.authorize_enrollment(caller)?;
                let enrollment = ManufacturerEnrollment::new(
                    representative_id,
                    company_prefix,
                    from_bytes32_hex(&company_name)?,
                    Duration::from_millis(validity_duration_ms),
                );
                let receipt = registry.enroll_manufacturer(caller, enrollment)?;
                let view = ManufacturerView::try_from(&receipt.record)?;
                Ok((RegistryReply::Manufacturer(view), receipt.events))
            }
            RegistryRequest::EnrollProduct { product_code } => {
                registry.authorize_product_registration(caller)?;
                let receipt = registry.enroll_product(caller, ProductCode::new(product_code)?)?;
                Ok((
                    RegistryReply::Product(ProductView::from(&receipt.record)),
                    receipt.events,
                ))
            }
            RegistryRequest::ShipProduct {
                product_code,
                recipient,
            } => {
                let code = ProductCode::new(product_code)?;
                let receipt = registry.ship_product(caller, &code, recipient)?;
                Ok((
                    RegistryReply::Product(ProductView::from(&receipt.record)),
                    receipt.events,
                ))
            }
            RegistryRequest::ReceiveProduct { product_code } => {
                let code = ProductCode::new(product_code)?;
                let receipt = registry.receive_product(caller, &code)?;
                Ok((
                    RegistryReply::Product(ProductView::from(&receipt.record)),
                    receipt.events,
                ))
            }
            RegistryRequest::GetCurrentOwner { product_code } => query(RegistryReply::Account(
                registry.get_current_owner(&ProductCode::new(product_code)?)?,
            )),
            RegistryRequest::GetRecipient { product_code } => {
                let recipient = registry.get_recipient(&ProductCode::new(product_code)?)?;
                query(RegistryReply::Account(recipient.unwrap_or(AccountId::ZERO)))
            }
            RegistryRequest::GetProductStatus { product_code } => query(RegistryReply::Status(
                registry.get_product_status(&ProductCode::new(product_code)?)?,
            )),
            RegistryRequest::GetManufacturerAddress { product_code } => {
                query(RegistryReply::Account(
                    registry.get_manufacturer_address(&ProductCode::new(product_code)?)?,
                ))
            }
            RegistryRequest::GetCompanyPrefix { product_code } => query(RegistryReply::Prefix(
                registry.get_company_prefix(&ProductCode::new(product_code)?)?,
            )),
            RegistryRequest::GetManufacturerName { product_code } => {
                let name = registry.get_manufacturer_name(&ProductCode::new(product_code)?)?;
                query(RegistryReply::Name(shared_types::to_bytes32_hex(&name)?))
            }
            RegistryRequest::GetProduct { product_code } => {
                let product = registry.get_product(&ProductCode::new(product_code)?)?;
                query(RegistryReply::Product(ProductView::from(&product)))
            }
            RegistryRequest::Manufacturers { index } => {
                let record = registry.manufacturers(index)?;
                query(RegistryReply::Manufacturer(ManufacturerView::try_from(
                    &record,
                )?))
            }
            RegistryRequest::Manufacturer { representative_id } => {
                let record = registry.manufacturer(&representative_id)?;
                query(RegistryReply::Manufacturer(ManufacturerView::try_from(
                    &record,
                )?))
            }
        }
    }
}

type Outcome = Result<(RegistryReply, Vec<CustodyEvent>), RegistryError>;

/// Queries emit nothing.
fn query(reply: RegistryReply) -> Outcome {
    Ok((reply, Vec::new()))
}
