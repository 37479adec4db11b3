// Queue Store Port (Interface)

use crate::domain::{BusinessId, EntryId, EntryStatus, Phone, QueueEntry};
use crate::error::Result;
use async_trait::async_trait;

/// Store interface for queue entry persistence.
///
/// These are the auto-committed operations; the admission and progression
/// paths use the transactional variants in `port::transaction` instead, so
/// their check-then-insert sequences stay atomic per business.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Insert a new entry. Fails with `Conflict` if a uniqueness
    /// invariant would be violated.
    async fn insert(&self, entry: &QueueEntry) -> Result<()>;

    /// Find entry by ID
    async fn find_by_id(&self, id: &EntryId) -> Result<Option<QueueEntry>>;

    /// Update a mutated entry
    async fn update(&self, entry: &QueueEntry) -> Result<()>;

    /// Is there a waiting entry for this (business, phone) pair?
    async fn exists_waiting(&self, business_id: &BusinessId, phone: &Phone) -> Result<bool>;

    /// Number of waiting entries for a business
    async fn count_waiting(&self, business_id: &BusinessId) -> Result<i64>;

    /// Count entries by status
    async fn count_by_status(&self, business_id: &BusinessId, status: EntryStatus) -> Result<i64>;

    /// Waiting entries for a business, position ascending
    async fn list_waiting(&self, business_id: &BusinessId) -> Result<Vec<QueueEntry>>;

    /// Re-derive contiguous 1..N positions for the business's waiting
    /// entries, ordered by created_at ascending. Returns rows touched.
    async fn renumber(&self, business_id: &BusinessId) -> Result<u64>;
}
