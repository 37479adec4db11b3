//! SDK Request/Response Types
//!
//! Client-side mirrors of the daemon's wire contract.

use serde::{Deserialize, Serialize};

/// Wire representation of a queue entry
#[derive(Debug, Clone, Deserialize)]
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

/// Wire representation of a business
#[derive(Debug, Clone, Deserialize)]
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

/// queue.join.v1
#[derive(Debug, Clone, Serialize)]
pub struct JoinQueueRequest {
    pub business_id: String,
    pub phone: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinQueueResponse {
    pub message: String,
    pub entry: EntryDto,
}

/// queue.activate.v1
#[derive(Debug, Clone, Deserialize)]
pub struct ActivateQueueResponse {
    pub message: String,
}

/// queue.status.v1
#[derive(Debug, Clone, Deserialize)]
pub struct QueueStatusResponse {
    pub business_id: String,
    pub is_queue_active: bool,
    pub waiting_count: i64,
    pub max_queue_size: i64,
    pub estimated_wait_time: i64,
}

/// queue.next.v1
#[derive(Debug, Clone, Deserialize)]
pub struct CallNextResponse {
    pub message: String,
    pub entry: EntryDto,
}

/// queue.serve.v1
#[derive(Debug, Clone, Deserialize)]
pub struct ServeEntryResponse {
    pub entry: EntryDto,
}

/// queue.cancel.v1
#[derive(Debug, Clone, Deserialize)]
pub struct CancelEntryResponse {
    pub entry_id: String,
    pub cancelled: bool,
}

/// business.register.v1
#[derive(Debug, Clone, Serialize)]
pub struct RegisterBusinessRequest {
    pub name: String,
    pub business_type: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_queue_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_service_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timeout_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterBusinessResponse {
    pub message: String,
    pub business: BusinessDto,
}

/// admin.stats.v1
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub business_count: i64,
    pub entry_count: i64,
    pub terminal_entry_count: i64,
    pub db_size_bytes: i64,
    pub uptime_seconds: i64,
}
