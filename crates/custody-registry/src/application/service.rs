//! Custody Registry Service
//!
//! Main service implementing `CustodyRegistryApi`.
//!
//! Every mutating operation follows the same pipeline:
//! 1. Authorize the caller
//! 2. Take the per-key lock (bounded by `RegistryConfig::lock_timeout`)
//! 3. Load the record and apply the transition to a copy
//! 4. Check invariants on the copy
//! 5. Commit with a single store write
//! 6. Publish notifications, still under the key lock
//!
//! A failure at any step before 5 leaves the store untouched and publishes
//! nothing. Notifications for one product are therefore observed in commit
//! order.

use crate::config::RegistryConfig;
use crate::domain::entities::{ManufacturerEnrollment, ManufacturerRecord, ProductRecord};
use crate::domain::errors::{RecordRef, RegistryError};
use crate::domain::invariants;
use crate::domain::locks::{KeyGuard, KeyLocks, LockKey};
use crate::metrics;
use crate::ports::inbound::{CustodyRegistryApi, OperationReceipt};
use crate::ports::outbound::{CustodyStore, NotificationSink};
use serde::{Deserialize, Serialize};
use shared_bus::{CustodyEvent, ProductStatusEvent};
use shared_types::{encode_bytes32, AccountId, ProductCode};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

/// Counters since the service was constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub operations_committed: u64,
    pub operations_rejected: u64,
    pub events_published: u64,
}

#[derive(Default)]
struct StatsCounters {
    committed: AtomicU64,
    rejected: AtomicU64,
    events: AtomicU64,
}

/// Custody Registry Service
///
/// Holds the administrator identity as plain configuration; there is no
/// process-wide owner.
pub struct CustodyRegistryService<S, N> {
    admin: AccountId,
    config: RegistryConfig,
    store: S,
    sink: N,
    locks: KeyLocks<LockKey>,
    stats: StatsCounters,
}

impl<S: CustodyStore, N: NotificationSink> CustodyRegistryService<S, N> {
    /// Create a new service with default config
    pub fn new(admin: AccountId, store: S, sink: N) -> Self {
        Self::with_config(admin, RegistryConfig::default(), store, sink)
    }

    /// Create a new service with custom config
    pub fn with_config(admin: AccountId, config: RegistryConfig, store: S, sink: N) -> Self {
        Self {
            admin,
            config,
            store,
            sink,
            locks: KeyLocks::new(),
            stats: StatsCounters::default(),
        }
    }

    pub fn admin(&self) -> AccountId {
        self.admin
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            operations_committed: self.stats.committed.load(Ordering::Relaxed),
            operations_rejected: self.stats.rejected.load(Ordering::Relaxed),
            events_published: self.stats.events.load(Ordering::Relaxed),
        }
    }

    fn lock(&self, key: LockKey) -> Result<KeyGuard<'_, LockKey>, RegistryError> {
        let record = match &key {
            LockKey::Product(code) => RecordRef::Product(code.clone()),
            LockKey::Manufacturer(id) => RecordRef::Manufacturer(*id),
        };
        self.locks
            .acquire(key, self.config.lock_timeout)
            .ok_or_else(|| {
                metrics::record_lock_timeout();
                RegistryError::Timeout(record)
            })
    }

    fn emit(&self, events: &[CustodyEvent]) {
        for event in events {
            self.sink.publish(event.clone());
            self.stats.events.fetch_add(1, Ordering::Relaxed);
            metrics::record_event_published();
        }
    }

    /// Account for the outcome of a mutating operation.
    fn finish<T>(
        &self,
        operation: &'static str,
        caller: AccountId,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        match &result {
            Ok(_) => {
                self.stats.committed.fetch_add(1, Ordering::Relaxed);
                metrics::record_operation(operation, "committed");
            }
            Err(err) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                metrics::record_operation(operation, err.kind().as_str());
                match err {
                    RegistryError::Internal(_) => {
                        error!(operation, caller = %caller, error = %err, "Operation failed")
                    }
                    _ => warn!(operation, caller = %caller, error = %err, "Operation rejected"),
                }
            }
        }
        result
    }

    fn require_product(&self, product_code: &ProductCode) -> Result<ProductRecord, RegistryError> {
        self.store
            .get_product(product_code)?
            .ok_or_else(|| RegistryError::RecordNotFound(RecordRef::Product(product_code.clone())))
    }

    fn require_manufacturer(&self, id: &AccountId) -> Result<ManufacturerRecord, RegistryError> {
        self.store
            .get_manufacturer(id)?
            .ok_or(RegistryError::RecordNotFound(RecordRef::Manufacturer(*id)))
    }

    fn checked(product: ProductRecord) -> Result<ProductRecord, RegistryError> {
        invariants::check_product(&product).map_err(|violation| {
            RegistryError::Internal(format!(
                "invariant violated for {}: {}",
                product.product_code, violation
            ))
        })?;
        Ok(product)
    }

    fn ensure_admin(&self, caller: AccountId) -> Result<(), RegistryError> {
        if caller != self.admin {
            return Err(RegistryError::Unauthorized { caller });
        }
        Ok(())
    }

    fn ensure_manufacturer(&self, caller: AccountId) -> Result<ManufacturerRecord, RegistryError> {
        self.store
            .get_manufacturer(&caller)?
            .ok_or(RegistryError::ManufacturerNotFound { caller })
    }

    fn do_enroll_manufacturer(
        &self,
        caller: AccountId,
        enrollment: ManufacturerEnrollment,
    ) -> Result<OperationReceipt<ManufacturerRecord>, RegistryError> {
        self.ensure_admin(caller)?;
        if enrollment.representative_id.is_zero() {
            return Err(RegistryError::InvalidInput(
                "representative must not be the zero account".into(),
            ));
        }
        // The name must survive the fixed-width wire form.
        encode_bytes32(&enrollment.company_name)?;

        let representative_id = enrollment.representative_id;
        let _guard = self.lock(LockKey::Manufacturer(representative_id))?;

        let existing = self.store.get_manufacturer(&representative_id)?;
        if existing.is_some() && !self.config.allow_manufacturer_reenrollment {
            return Err(RegistryError::AlreadyExists(RecordRef::Manufacturer(
                representative_id,
            )));
        }

        let record = enrollment.into_record();
        self.store.put_manufacturer(record.clone())?;

        let events = vec![CustodyEvent::ManufacturerCreated {
            representative_id,
            company_prefix: record.company_prefix.clone(),
            company_name: record.company_name.clone(),
            validity_duration: record.validity_duration,
        }];
        self.emit(&events);

        info!(
            representative_id = %representative_id,
            company_prefix = %record.company_prefix,
            company_name = %record.company_name,
            reenrolled = existing.is_some(),
            "Manufacturer enrolled"
        );
        Ok(OperationReceipt { record, events })
    }

    fn do_enroll_product(
        &self,
        caller: AccountId,
        product_code: ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let manufacturer = self.ensure_manufacturer(caller)?;

        let _guard = self.lock(LockKey::Product(product_code.clone()))?;

        if self.store.get_product(&product_code)?.is_some() {
            return Err(RegistryError::AlreadyExists(RecordRef::Product(product_code)));
        }

        let product = ProductRecord::new(product_code, caller);
        if !invariants::invariant_manufacturer_backs_product(&product, Some(&manufacturer)) {
            return Err(RegistryError::Internal(format!(
                "manufacturer record does not back {}",
                product.product_code
            )));
        }
        let product = Self::checked(product)?;
        self.store.put_product(product.clone())?;

        let events = vec![CustodyEvent::ProductCreated {
            product_code: product.product_code.clone(),
            owner: caller,
        }];
        self.emit(&events);

        if let Ok(count) = self.store.product_count() {
            metrics::set_products_registered(count);
        }
        info!(
            product_code = %product.product_code,
            owner = %caller,
            status = %product.status,
            "Product enrolled"
        );
        Ok(OperationReceipt {
            record: product,
            events,
        })
    }

    fn do_ship_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
        recipient: AccountId,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let _guard = self.lock(LockKey::Product(product_code.clone()))?;

        let mut product = self.require_product(product_code)?;
        product.ship(caller, recipient)?;
        let product = Self::checked(product)?;
        self.store.put_product(product.clone())?;

        let events = vec![
            CustodyEvent::ProductStatusChanged(product.status_event()),
            CustodyEvent::ProductShipped {
                product_code: product.product_code.clone(),
                sender: caller,
                recipient,
            },
        ];
        self.emit(&events);

        info!(
            product_code = %product_code,
            caller = %caller,
            recipient = %recipient,
            status = %product.status,
            "Product shipped"
        );
        Ok(OperationReceipt {
            record: product,
            events,
        })
    }

    fn do_receive_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let _guard = self.lock(LockKey::Product(product_code.clone()))?;

        let mut product = self.require_product(product_code)?;
        product.receive(caller)?;
        let product = Self::checked(product)?;
        self.store.put_product(product.clone())?;

        let events = vec![CustodyEvent::ProductStatusChanged(product.status_event())];
        self.emit(&events);

        info!(
            product_code = %product_code,
            owner = %caller,
            status = %product.status,
            "Product received"
        );
        Ok(OperationReceipt {
            record: product,
            events,
        })
    }
}

impl<S: CustodyStore, N: NotificationSink> CustodyRegistryApi for CustodyRegistryService<S, N> {
    fn enroll_manufacturer(
        &self,
        caller: AccountId,
        enrollment: ManufacturerEnrollment,
    ) -> Result<OperationReceipt<ManufacturerRecord>, RegistryError> {
        let result = self.do_enroll_manufacturer(caller, enrollment);
        self.finish("enroll_manufacturer", caller, result)
    }

    fn enroll_product(
        &self,
        caller: AccountId,
        product_code: ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let result = self.do_enroll_product(caller, product_code);
        self.finish("enroll_product", caller, result)
    }

    fn authorize_enrollment(&self, caller: AccountId) -> Result<(), RegistryError> {
        self.ensure_admin(caller)
            .or_else(|err| self.finish("enroll_manufacturer", caller, Err(err)))
    }

    fn authorize_product_registration(&self, caller: AccountId) -> Result<(), RegistryError> {
        self.ensure_manufacturer(caller)
            .map(|_| ())
            .or_else(|err| self.finish("enroll_product", caller, Err(err)))
    }

    fn ship_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
        recipient: AccountId,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let result = self.do_ship_product(caller, product_code, recipient);
        self.finish("ship_product", caller, result)
    }

    fn receive_product(
        &self,
        caller: AccountId,
        product_code: &ProductCode,
    ) -> Result<OperationReceipt<ProductRecord>, RegistryError> {
        let result = self.do_receive_product(caller, product_code);
        self.finish("receive_product", caller, result)
    }

    fn get_current_owner(&self, product_code: &ProductCode) -> Result<AccountId, RegistryError> {
        Ok(self.require_product(product_code)?.current_owner)
    }

    fn get_recipient(
        &self,
        product_code: &ProductCode,
    ) -> Result<Option<AccountId>, RegistryError> {
        Ok(self.require_product(product_code)?.pending_recipient)
    }

    fn get_product_status(
        &self,
        product_code: &ProductCode,
    ) -> Result<ProductStatusEvent, RegistryError> {
        let status = self.require_product(product_code)?.status_event();
        debug!(product_code = %product_code, status = %status.status, "Status queried");
        Ok(status)
    }

    fn get_manufacturer_address(
        &self,
        product_code: &ProductCode,
    ) -> Result<AccountId, RegistryError> {
        Ok(self.require_product(product_code)?.manufacturer_ref)
    }

    fn get_company_prefix(&self, product_code: &ProductCode) -> Result<String, RegistryError> {
        let product = self.require_product(product_code)?;
        Ok(self
            .require_manufacturer(&product.manufacturer_ref)?
            .company_prefix)
    }

    fn get_manufacturer_name(&self, product_code: &ProductCode) -> Result<String, RegistryError> {
        let product = self.require_product(product_code)?;
        Ok(self
            .require_manufacturer(&product.manufacturer_ref)?
            .company_name)
    }

    fn get_product(&self, product_code: &ProductCode) -> Result<ProductRecord, RegistryError> {
        self.require_product(product_code)
    }

    fn manufacturers(&self, index: usize) -> Result<ManufacturerRecord, RegistryError> {
        self.store
            .manufacturer_at(index)?
            .ok_or(RegistryError::RecordNotFound(RecordRef::ManufacturerIndex(
                index,
            )))
    }

    fn manufacturer(
        &self,
        representative_id: &AccountId,
    ) -> Result<ManufacturerRecord, RegistryError> {
        self.require_manufacturer(representative_id)
    }
}
