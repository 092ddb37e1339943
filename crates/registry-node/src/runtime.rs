//! Node runtime: wiring, audit log, request loop and shutdown.

use std::sync::Arc;

use anyhow::Result;
use custody_registry::{
    BusNotificationSink, CustodyRegistryService, InMemoryCustodyStore, RegistryHandler,
};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, Subscription};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::NodeConfig;

/// The registry as the node wires it.
pub type Registry =
    CustodyRegistryService<InMemoryCustodyStore, BusNotificationSink<Arc<InMemoryEventBus>>>;

/// The main node runtime.
pub struct NodeRuntime {
    config: NodeConfig,
    /// Event bus shared by the registry and observers.
    bus: Arc<InMemoryEventBus>,
    registry: Arc<Registry>,
    handler: RegistryHandler<Registry>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
    audit: Option<JoinHandle<u64>>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Self {
        info!(admin = %config.admin, "Creating custody registry node");

        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_capacity));
        let registry = Arc::new(CustodyRegistryService::with_config(
            config.admin,
            config.registry.clone(),
            InMemoryCustodyStore::new(),
            BusNotificationSink::new(Arc::clone(&bus)),
        ));
        let handler = RegistryHandler::new(Arc::clone(&registry));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            bus,
            registry,
            handler,
            shutdown_tx,
            shutdown_rx,
            audit: None,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn handler(&self) -> &RegistryHandler<Registry> {
        &self.handler
    }

    /// Start background tasks. The audit subscription exists before this
    /// returns, so no notification committed afterwards is missed.
    pub fn start(&mut self) {
        if self.audit.is_some() {
            return;
        }
        let subscription = self.bus.subscribe(EventFilter::all());
        self.audit = Some(tokio::spawn(audit_log(
            subscription,
            self.shutdown_rx.clone(),
        )));
        info!(
            lock_timeout_ms = self.config.registry.lock_timeout.as_millis() as u64,
            reenrollment = self.config.registry.allow_manufacturer_reenrollment,
            "Custody registry node started"
        );
    }

    /// Answer newline-delimited JSON requests until EOF or shutdown.
    /// Returns the number of requests answered.
    pub async fn serve_lines<R, W>(&self, reader: R, mut writer: W) -> Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut shutdown = self.shutdown_rx.clone();
        let mut served = 0u64;

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = shutdown.changed() => break,
            };
            let Some(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handler.handle_json(&line)?;
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            served += 1;
        }

        debug!(served, "Request loop finished");
        Ok(served)
    }

    /// Signal shutdown and wait for the audit log to flush.
    /// Returns the number of notifications the audit log recorded.
    pub async fn shutdown(mut self) -> u64 {
        info!("Initiating graceful shutdown...");
        let _ = self.shutdown_tx.send(true);

        let audited = match self.audit.take() {
            Some(task) => task.await.unwrap_or_else(|e| {
                warn!(error = %e, "Audit task ended abnormally");
                0
            }),
            None => 0,
        };

        let stats = self.registry.stats();
        info!(
            committed = stats.operations_committed,
            rejected = stats.operations_rejected,
            published = self.bus.events_published(),
            audited,
            "Shutdown complete"
        );
        audited
    }
}

/// Record every notification until shutdown, then drain what is buffered.
async fn audit_log(mut subscription: Subscription, mut shutdown: watch::Receiver<bool>) -> u64 {
    let mut recorded = 0u64;
    loop {
        tokio::select! {
            event = subscription.recv() => match event {
                Some(event) => {
                    record(&event);
                    recorded += 1;
                }
                None => return recorded,
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    for event in subscription.drain() {
        record(&event);
        recorded += 1;
    }
    if subscription.missed() > 0 {
        warn!(missed = subscription.missed(), "Audit log lost notifications");
    }
    recorded
}

fn record(event: &shared_bus::CustodyEvent) {
    info!(
        target: "custody::audit",
        event = event.name(),
        product_code = event.product_code().map(|c| c.as_str()).unwrap_or("-"),
        payload = %serde_json::to_string(event).unwrap_or_default(),
        "Notification"
    );
}
