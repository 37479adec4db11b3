// Domain Layer - Pure business logic and entities

pub mod business;
pub mod entry;
pub mod error;
pub mod phone;

// Re-exports
pub use business::{Business, BusinessId, QueueConfig, BUSINESS_TYPES};
pub use entry::{EntryId, EntryStatus, QueueEntry};
pub use error::DomainError;
pub use phone::Phone;
