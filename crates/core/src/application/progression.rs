// Queue Progression Use Cases
// Staff-side operations: call the next client, mark served, cancel.
// Every path that removes an entry from the waiting set renumbers the
// remaining positions inside the same transaction.

use crate::domain::QueueEntry;
use crate::error::{AppError, Result};
use crate::port::{BusinessRegistry, Notifier, TimeProvider, TransactionalQueueStore};
use std::sync::Arc;

/// Call the waiting entry at position 1 (waiting -> called).
pub async fn call_next(
    registry: &dyn BusinessRegistry,
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
    notifier: Arc<dyn Notifier>,
    business_id: &str,
) -> Result<QueueEntry> {
    if registry.find_by_id(&business_id.to_string()).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "business {business_id} not found"
        )));
    }

    let mut tx = store.begin_transaction().await?;

    let mut entry = tx
        .first_waiting(&business_id.to_string())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("no waiting entries for business {business_id}"))
        })?;

    entry.call(time_provider.now_millis())?;
    tx.update(&entry).await?;
    tx.renumber(&business_id.to_string()).await?;
    tx.commit().await?;

    tracing::info!(entry_id = %entry.id, business_id, "client called");

    let notify_entry = entry.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.entry_called(&notify_entry).await {
            tracing::warn!(entry_id = %notify_entry.id, error = %e, "call notification failed");
        }
    });

    Ok(entry)
}

/// Mark a called entry as served (called -> served).
pub async fn mark_served(
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
    entry_id: &str,
) -> Result<QueueEntry> {
    let mut tx = store.begin_transaction().await?;

    let mut entry = tx
        .find_by_id(&entry_id.to_string())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("entry {entry_id} not found")))?;

    entry.serve(time_provider.now_millis())?;
    tx.update(&entry).await?;
    tx.commit().await?;

    tracing::info!(entry_id = %entry.id, business_id = %entry.business_id, "client served");
    Ok(entry)
}

/// Cancel a waiting entry (waiting -> cancelled) and renumber the queue.
pub async fn cancel_entry(
    store: &dyn TransactionalQueueStore,
    time_provider: &dyn TimeProvider,
    entry_id: &str,
) -> Result<QueueEntry> {
    let mut tx = store.begin_transaction().await?;

    let mut entry = tx
        .find_by_id(&entry_id.to_string())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("entry {entry_id} not found")))?;

    entry.cancel(time_provider.now_millis())?;
    tx.update(&entry).await?;
    tx.renumber(&entry.business_id).await?;
    tx.commit().await?;

    tracing::info!(entry_id = %entry.id, business_id = %entry.business_id, "entry cancelled");
    Ok(entry)
}
