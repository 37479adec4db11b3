// Waitline Infrastructure - SQLite Adapter
// Implements: BusinessRegistry, QueueStore, TransactionalQueueStore, Maintenance

mod business_registry;
mod connection;
mod maintenance_impl;
mod migration;
mod queue_store;
mod transaction;

pub use business_registry::SqliteBusinessRegistry;
pub use connection::create_pool;
pub use maintenance_impl::SqliteMaintenance;
pub use migration::run_migrations;
pub use queue_store::SqliteQueueStore;
pub use transaction::SqliteQueueTransaction;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
