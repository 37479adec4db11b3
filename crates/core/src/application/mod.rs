// Application Layer - Use Cases

pub mod activation;
pub mod admission;
pub mod maintenance;
pub mod progression;
pub mod registration;
pub mod service;

// Re-exports
pub use admission::JoinRequest;
pub use maintenance::MaintenanceScheduler;
pub use registration::RegisterRequest;
pub use service::{QueueStatus, WaitlineService};
