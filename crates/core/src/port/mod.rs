// Port Layer - Interfaces for external dependencies

pub mod business_registry;
pub mod id_provider; // For deterministic testing
pub mod maintenance;
pub mod notifier;
pub mod queue_store;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use business_registry::BusinessRegistry;
pub use id_provider::IdProvider;
pub use maintenance::{Maintenance, MaintenanceConfig, MaintenanceStats};
pub use notifier::{LogNotifier, Notifier};
pub use queue_store::QueueStore;
pub use time_provider::TimeProvider;
pub use transaction::{QueueStoreTransaction, Transaction, TransactionalQueueStore};
