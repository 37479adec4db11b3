// Queue Admission Use Case

use crate::domain::{Phone, QueueEntry};
use crate::error::{AppError, Result};
use crate::port::{
    BusinessRegistry, IdProvider, Notifier, QueueStore, TimeProvider, TransactionalQueueStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Join request as received from the outside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub business_id: String,
    pub phone: String,
    pub client_name: String,
}

/// Field-level validation, before any store access.
///
/// Returns the parsed phone so the admission path works with the validated
/// form from here on.
pub fn validate_request(req: &JoinRequest) -> Result<Phone> {
    let phone = Phone::parse(&req.phone).map_err(AppError::Domain)?;
    if req.client_name.trim().is_empty() {
        return Err(AppError::Validation(
            "client name must not be empty".to_string(),
        ));
    }
    Ok(phone)
}

/// Execute the join-queue use case.
///
/// Precondition order (first failure wins): business exists, queue open,
/// phone valid, name non-empty, no duplicate waiting entry, capacity left.
/// The duplicate check, capacity check, and insert run in one store
/// transaction; losing a race surfaces as a store `Conflict`, which is
/// reclassified against the invariant that actually tripped.
pub async fn execute(
    registry: &dyn BusinessRegistry,
    store: &dyn TransactionalQueueStore,
    reads: &dyn QueueStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    notifier: Arc<dyn Notifier>,
    req: JoinRequest,
) -> Result<QueueEntry> {
    let config = registry
        .queue_config(&req.business_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("business {} not found", req.business_id)))?;

    if !config.is_queue_active {
        return Err(AppError::QueueClosed(format!(
            "queue for business {} is closed",
            req.business_id
        )));
    }

    let phone = validate_request(&req)?;

    let admitted = admit(
        store,
        id_provider,
        time_provider,
        &req,
        &phone,
        config.max_queue_size,
        config.average_service_time,
    )
    .await;

    let entry = match admitted {
        Ok(entry) => entry,
        Err(AppError::Conflict(_)) => {
            // Lost the race to a concurrent join. Re-check which invariant
            // tripped so the caller sees the right error, not a raw conflict.
            if reads.exists_waiting(&req.business_id, &phone).await? {
                return Err(AppError::DuplicateEntry(format!(
                    "phone {} is already waiting in queue of business {}",
                    phone, req.business_id
                )));
            }
            return Err(AppError::QueueFull(format!(
                "queue of business {} is at capacity",
                req.business_id
            )));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(
        entry_id = %entry.id,
        business_id = %entry.business_id,
        position = entry.position,
        wait_minutes = entry.estimated_wait_time,
        "client admitted to queue"
    );

    // Best-effort notification, detached from the admission result
    let notify_entry = entry.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.entry_admitted(&notify_entry).await {
            tracing::warn!(entry_id = %notify_entry.id, error = %e, "admission notification failed");
        }
    });

    Ok(entry)
}

/// Duplicate check, capacity check, position assignment, and insert as one
/// atomic unit. Dropping the transaction on any error path rolls it back.
async fn admit(
    store: &dyn TransactionalQueueStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: &JoinRequest,
    phone: &Phone,
    max_queue_size: i64,
    average_service_time: i64,
) -> Result<QueueEntry> {
    let mut tx = store.begin_transaction().await?;

    if tx.exists_waiting(&req.business_id, phone).await? {
        return Err(AppError::DuplicateEntry(format!(
            "phone {} is already waiting in queue of business {}",
            phone, req.business_id
        )));
    }

    let waiting = tx.count_waiting(&req.business_id).await?;
    if waiting >= max_queue_size {
        return Err(AppError::QueueFull(format!(
            "queue of business {} is at capacity ({max_queue_size})",
            req.business_id
        )));
    }

    let position = waiting + 1;
    let estimated_wait_time = waiting * average_service_time / 60;

    let entry = QueueEntry::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        req.business_id.clone(),
        phone.clone(),
        req.client_name.trim(),
        position,
        estimated_wait_time,
    );

    tx.insert(&entry).await?;
    tx.commit().await?;

    Ok(entry)
}
