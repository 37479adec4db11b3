// Notification Dispatch Port

use crate::domain::QueueEntry;
use crate::error::Result;
use async_trait::async_trait;

/// Fire-and-forget client notifications (SMS gateway, push, ...).
///
/// Dispatch happens after the admission or call transaction has committed
/// and is best-effort: a failure is logged, never propagated back into the
/// queue decision.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Client was admitted to the queue
    async fn entry_admitted(&self, entry: &QueueEntry) -> Result<()>;

    /// Client was called to the counter
    async fn entry_called(&self, entry: &QueueEntry) -> Result<()>;
}

/// Log-only notifier (development and tests; the SMS gateway lives outside
/// this repository)
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn entry_admitted(&self, entry: &QueueEntry) -> Result<()> {
        tracing::info!(
            entry_id = %entry.id,
            phone = %entry.phone,
            position = entry.position,
            wait_minutes = entry.estimated_wait_time,
            "queue admission notification"
        );
        Ok(())
    }

    async fn entry_called(&self, entry: &QueueEntry) -> Result<()> {
        tracing::info!(
            entry_id = %entry.id,
            phone = %entry.phone,
            "queue call notification"
        );
        Ok(())
    }
}
