// Waitline Service - facade bundling the injected ports

use crate::application::{activation, admission, progression, registration};
use crate::domain::{Business, QueueEntry};
use crate::error::{AppError, Result};
use crate::port::{
    BusinessRegistry, IdProvider, Notifier, QueueStore, TimeProvider, TransactionalQueueStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Point-in-time snapshot of a business's queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    pub business_id: String,
    pub is_queue_active: bool,
    pub waiting_count: i64,
    pub max_queue_size: i64,
    /// Minutes a client joining right now would wait
    pub estimated_wait_time: i64,
}

/// Application service wiring the use cases to their ports
pub struct WaitlineService {
    registry: Arc<dyn BusinessRegistry>,
    queue_store: Arc<dyn QueueStore>,
    tx_queue_store: Arc<dyn TransactionalQueueStore>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    notifier: Arc<dyn Notifier>,
}

impl WaitlineService {
    pub fn new(
        registry: Arc<dyn BusinessRegistry>,
        queue_store: Arc<dyn QueueStore>,
        tx_queue_store: Arc<dyn TransactionalQueueStore>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            queue_store,
            tx_queue_store,
            id_provider,
            time_provider,
            notifier,
        }
    }

    /// Admit a client to a business's queue
    pub async fn join_queue(&self, req: admission::JoinRequest) -> Result<QueueEntry> {
        admission::execute(
            self.registry.as_ref(),
            self.tx_queue_store.as_ref(),
            self.queue_store.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            Arc::clone(&self.notifier),
            req,
        )
        .await
    }

    /// Open or close a business's queue
    pub async fn set_queue_active(&self, business_id: &str, active: bool) -> Result<()> {
        activation::execute(
            self.registry.as_ref(),
            self.time_provider.as_ref(),
            business_id,
            active,
        )
        .await
    }

    /// Call the next waiting client
    pub async fn call_next(&self, business_id: &str) -> Result<QueueEntry> {
        progression::call_next(
            self.registry.as_ref(),
            self.tx_queue_store.as_ref(),
            self.time_provider.as_ref(),
            Arc::clone(&self.notifier),
            business_id,
        )
        .await
    }

    /// Mark a called client as served
    pub async fn mark_served(&self, entry_id: &str) -> Result<QueueEntry> {
        progression::mark_served(
            self.tx_queue_store.as_ref(),
            self.time_provider.as_ref(),
            entry_id,
        )
        .await
    }

    /// Cancel a waiting entry
    pub async fn cancel_entry(&self, entry_id: &str) -> Result<QueueEntry> {
        progression::cancel_entry(
            self.tx_queue_store.as_ref(),
            self.time_provider.as_ref(),
            entry_id,
        )
        .await
    }

    /// Register a new business
    pub async fn register_business(&self, req: registration::RegisterRequest) -> Result<Business> {
        registration::execute(
            self.registry.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Current queue snapshot for a business
    pub async fn queue_status(&self, business_id: &str) -> Result<QueueStatus> {
        let config = self
            .registry
            .queue_config(&business_id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("business {business_id} not found")))?;

        let waiting = self
            .queue_store
            .count_waiting(&business_id.to_string())
            .await?;

        Ok(QueueStatus {
            business_id: business_id.to_string(),
            is_queue_active: config.is_queue_active,
            waiting_count: waiting,
            max_queue_size: config.max_queue_size,
            estimated_wait_time: waiting * config.average_service_time / 60,
        })
    }
}
