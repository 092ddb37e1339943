//! Demo custody flow.
//!
//! The administrator enrolls a manager, the manager registers a product and
//! ships it to a retailer, then every query is read back. All calls go
//! through the request handler exactly as a remote client's would.

use anyhow::{anyhow, bail, Result};
use custody_registry::ipc::ProductView;
use custody_registry::{CustodyRegistryApi, RegistryHandler, RegistryReply, RegistryRequest};
use shared_bus::ProductStatusEvent;
use shared_types::{from_bytes32_hex, to_bytes32_hex, AccountId, AuthenticatedRequest};
use tracing::info;

pub const DEMO_PRODUCT: &str = "112257";
pub const DEMO_PREFIX: &str = "321";
pub const DEMO_COMPANY: &str = "NewCompany LLC";
pub const DEMO_VALIDITY_MS: u64 = 3_600_000;

/// Accounts taking part in the demo.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccounts {
    pub admin: AccountId,
    pub manager: AccountId,
    pub retailer: AccountId,
}

impl DemoAccounts {
    pub fn with_admin(admin: AccountId) -> Self {
        Self {
            admin,
            manager: AccountId::repeat_byte(0x11),
            retailer: AccountId::repeat_byte(0x22),
        }
    }
}

/// What the demo read back at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub manufacturer_address: AccountId,
    pub manufacturer_name: String,
    pub company_prefix: String,
    pub status: ProductStatusEvent,
    pub owner: AccountId,
    pub recipient: AccountId,
}

fn call<A: CustodyRegistryApi>(
    handler: &RegistryHandler<A>,
    caller: AccountId,
    request: RegistryRequest,
) -> Result<RegistryReply> {
    let method = request.method();
    let response = handler.handle(AuthenticatedRequest::new(caller, request));
    if let Some(failure) = response.error {
        bail!("{} rejected: {}", method, failure.message);
    }
    response
        .reply
        .ok_or_else(|| anyhow!("{} returned no reply", method))
}

fn account(reply: RegistryReply) -> Result<AccountId> {
    match reply {
        RegistryReply::Account(id) => Ok(id),
        other => Err(anyhow!("expected an account, got {:?}", other)),
    }
}

fn product(reply: RegistryReply) -> Result<ProductView> {
    match reply {
        RegistryReply::Product(view) => Ok(view),
        other => Err(anyhow!("expected a product, got {:?}", other)),
    }
}

fn status(reply: RegistryReply) -> Result<ProductStatusEvent> {
    match reply {
        RegistryReply::Status(event) => Ok(event),
        other => Err(anyhow!("expected a status, got {:?}", other)),
    }
}

/// Run the flow end to end.
pub fn run_demo<A: CustodyRegistryApi>(
    handler: &RegistryHandler<A>,
    accounts: DemoAccounts,
) -> Result<DemoReport> {
    let code = || DEMO_PRODUCT.to_string();

    call(
        handler,
        accounts.admin,
        RegistryRequest::EnrollManufacturer {
            representative_id: accounts.manager,
            company_prefix: DEMO_PREFIX.to_string(),
            company_name: to_bytes32_hex(DEMO_COMPANY)?,
            validity_duration_ms: DEMO_VALIDITY_MS,
        },
    )?;
    info!(manager = %accounts.manager, "Enrolled manufacturer");

    let created = product(call(
        handler,
        accounts.manager,
        RegistryRequest::EnrollProduct {
            product_code: code(),
        },
    )?)?;
    info!(product_code = %created.product_code, owner = %created.current_owner, "Enrolled product");

    let initial = status(call(
        handler,
        accounts.manager,
        RegistryRequest::GetProductStatus {
            product_code: code(),
        },
    )?)?;
    info!(product_code = %initial.product_code, status = %initial.status, "Product status");

    let shipped = product(call(
        handler,
        accounts.manager,
        RegistryRequest::ShipProduct {
            product_code: code(),
            recipient: accounts.retailer,
        },
    )?)?;
    info!(product_code = %shipped.product_code, recipient = %shipped.recipient, "Shipped product");

    let manufacturer_address = account(call(
        handler,
        accounts.retailer,
        RegistryRequest::GetManufacturerAddress {
            product_code: code(),
        },
    )?)?;
    let manufacturer_name = match call(
        handler,
        accounts.retailer,
        RegistryRequest::GetManufacturerName {
            product_code: code(),
        },
    )? {
        RegistryReply::Name(hex) => from_bytes32_hex(&hex)?,
        other => bail!("expected a name, got {:?}", other),
    };
    let company_prefix = match call(
        handler,
        accounts.retailer,
        RegistryRequest::GetCompanyPrefix {
            product_code: code(),
        },
    )? {
        RegistryReply::Prefix(prefix) => prefix,
        other => bail!("expected a prefix, got {:?}", other),
    };
    let status = status(call(
        handler,
        accounts.retailer,
        RegistryRequest::GetProductStatus {
            product_code: code(),
        },
    )?)?;
    let owner = account(call(
        handler,
        accounts.retailer,
        RegistryRequest::GetCurrentOwner {
            product_code: code(),
        },
    )?)?;
    let recipient = account(call(
        handler,
        accounts.retailer,
        RegistryRequest::GetRecipient {
            product_code: code(),
        },
    )?)?;

    let report = DemoReport {
        manufacturer_address,
        manufacturer_name,
        company_prefix,
        status,
        owner,
        recipient,
    };
    info!(
        manufacturer_address = %report.manufacturer_address,
        manufacturer_name = %report.manufacturer_name,
        company_prefix = %report.company_prefix,
        status = %report.status.status,
        owner = %report.owner,
        recipient = %report.recipient,
        "Demo complete"
    );
    Ok(report)
}
