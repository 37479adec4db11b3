// Business Registry Port (Interface)

use crate::domain::{Business, BusinessId, QueueConfig};
use crate::error::Result;
use async_trait::async_trait;

/// Registry of businesses and their queue configuration.
///
/// The admission path only ever reads from this; the write operations back
/// the registration and activation use cases.
#[async_trait]
pub trait BusinessRegistry: Send + Sync {
    /// Insert a newly registered business
    async fn insert(&self, business: &Business) -> Result<()>;

    /// Find a business by ID
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>>;

    /// Queue configuration for an existing, active business.
    /// Returns None when the business is unknown or deactivated.
    async fn queue_config(&self, id: &BusinessId) -> Result<Option<QueueConfig>>;

    /// Flip the queue open/closed flag. Returns false when no such business
    /// exists (no row updated).
    async fn set_queue_active(&self, id: &BusinessId, active: bool, now_millis: i64)
        -> Result<bool>;
}
