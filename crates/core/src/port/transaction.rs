// Transaction port for atomic admission and progression

use crate::domain::{BusinessId, EntryId, Phone, QueueEntry};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional QueueStore operations
#[async_trait]
pub trait TransactionalQueueStore: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn QueueStoreTransaction>>;
}

/// QueueStore operations within a transaction.
///
/// The duplicate check, capacity check, and insert of one admission must
/// all run through the same transaction; likewise a status change and the
/// renumbering it triggers.
#[async_trait]
pub trait QueueStoreTransaction: Transaction {
    async fn exists_waiting(&mut self, business_id: &BusinessId, phone: &Phone) -> Result<bool>;

    async fn count_waiting(&mut self, business_id: &BusinessId) -> Result<i64>;

    async fn insert(&mut self, entry: &QueueEntry) -> Result<()>;

    async fn find_by_id(&mut self, id: &EntryId) -> Result<Option<QueueEntry>>;

    /// The waiting entry at position 1, if any
    async fn first_waiting(&mut self, business_id: &BusinessId) -> Result<Option<QueueEntry>>;

    async fn update(&mut self, entry: &QueueEntry) -> Result<()>;

    async fn renumber(&mut self, business_id: &BusinessId) -> Result<u64>;
}
