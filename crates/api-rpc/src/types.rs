//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};
use waitline_core::domain::{Business, QueueEntry};

/// Wire representation of a queue entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDto {
    pub id: String,
    pub business_id: String,
    pub phone: String,
    pub client_name: String,
    pub position: i64,
    pub estimated_wait_time: i64,
    pub status: String,
    pub created_at: i64,
}

impl From<QueueEntry> for EntryDto {
    fn from(e: QueueEntry) -> Self {
        Self {
            id: e.id,
            business_id: e.business_id,
            phone: e.phone.to_string(),
            client_name: e.client_name,
            position: e.position,
            estimated_wait_time: e.estimated_wait_time,
            status: e.status.to_string(),
            created_at: e.created_at,
        }
    }
}

/// Wire representation of a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDto {
    pub id: String,
    pub name: String,
    pub business_type: String,
    pub phone: String,
    pub is_queue_active: bool,
    pub max_queue_size: i64,
    pub average_service_time: i64,
    pub created_at: i64,
}

impl From<Business> for BusinessDto {
    fn from(b: Business) -> Self {
        Self {
            id: b.id,
            name: b.name,
            business_type: b.business_type,
            phone: b.phone.to_string(),
            is_queue_active: b.is_queue_active,
            max_queue_size: b.max_queue_size,
            average_service_time: b.average_service_time,
            created_at: b.created_at,
        }
    }
}

/// queue.join.v1 - Join a business's queue
#[derive(Debug, Deserialize)]
pub struct JoinQueueRequest {
    pub business_id: String,
    pub phone: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinQueueResponse {
    pub message: String,
    pub entry: EntryDto,
}

/// queue.activate.v1 - Open or close a queue
#[derive(Debug, Deserialize)]
pub struct ActivateQueueRequest {
    pub business_id: String,
    pub is_queue_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivateQueueResponse {
    pub message: String,
}

/// queue.status.v1 - Queue snapshot
#[derive(Debug, Deserialize)]
pub struct QueueStatusRequest {
    pub business_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueStatusResponse {
    pub business_id: String,
    pub is_queue_active: bool,
    pub waiting_count: i64,
    pub max_queue_size: i64,
    pub estimated_wait_time: i64,
}

/// queue.next.v1 - Call the next waiting client
#[derive(Debug, Deserialize)]
pub struct CallNextRequest {
    pub business_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallNextResponse {
    pub message: String,
    pub entry: EntryDto,
}

/// queue.serve.v1 - Mark a called client as served
#[derive(Debug, Deserialize)]
pub struct ServeEntryRequest {
    pub entry_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServeEntryResponse {
    pub entry: EntryDto,
}

/// queue.cancel.v1 - Cancel a waiting entry
#[derive(Debug, Deserialize)]
pub struct CancelEntryRequest {
    pub entry_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelEntryResponse {
    pub entry_id: String,
    pub cancelled: bool,
}

/// business.register.v1 - Register a business
#[derive(Debug, Deserialize)]
pub struct RegisterBusinessRequest {
    pub name: String,
    pub business_type: String,
    pub phone: String,
    #[serde(default)]
    pub max_queue_size: Option<i64>,
    #[serde(default)]
    pub average_service_time: Option<i64>,
    #[serde(default)]
    pub client_timeout_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterBusinessResponse {
    pub message: String,
    pub business: BusinessDto,
}

/// admin.stats.v1 - Engine statistics
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub business_count: i64,
    pub entry_count: i64,
    pub terminal_entry_count: i64,
    pub db_size_bytes: i64,
    pub uptime_seconds: i64,
}

/// admin.maintenance.v1 - Run manual maintenance
#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    #[serde(default)]
    pub force_vacuum: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceResponse {
    pub vacuum_run: bool,
    pub entries_expired: i64,
    pub entries_deleted: i64,
    pub db_size_before: i64,
    pub db_size_after: i64,
}
