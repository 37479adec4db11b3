// Business Domain Model

use crate::domain::phone::Phone;
use serde::{Deserialize, Serialize};

/// Business ID (UUID v4)
pub type BusinessId = String;

/// Recognized business types
pub const BUSINESS_TYPES: &[&str] = &[
    "bakery",
    "hairdresser",
    "pharmacy",
    "garage",
    "restaurant",
    "medical_office",
    "dentist",
    "veterinary",
    "optician",
    "bank",
    "insurance",
    "notary",
    "lawyer",
    "accountant",
    "real_estate",
    "prefecture",
    "city_hall",
    "family_allowance",
    "employment_agency",
    "public_service",
    "post_office",
    "dry_cleaning",
    "cobbler",
    "watchmaker",
    "phone_repair",
    "beauty_salon",
    "massage",
    "tattoo",
    "nail_salon",
    "barber",
    "vehicle_inspection",
    "gas_station",
    "auto_body",
    "tire_service",
    "other",
];

/// Business Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub business_type: String,
    pub phone: Phone,

    /// Soft-delete flag; deactivated businesses are invisible to admission
    pub is_active: bool,
    pub is_queue_active: bool,
    pub is_queue_paused: bool,
    pub max_queue_size: i64,
    /// Average time to serve one client, in seconds
    pub average_service_time: i64,
    /// Waiting entries older than this are expired by maintenance
    pub client_timeout_minutes: i64,

    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl Business {
    /// Create a new business with the queue closed.
    ///
    /// `id` and `created_at` are injected, never generated here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        name: impl Into<String>,
        business_type: impl Into<String>,
        phone: Phone,
        max_queue_size: i64,
        average_service_time: i64,
        client_timeout_minutes: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            business_type: business_type.into(),
            phone,
            is_active: true,
            is_queue_active: false,
            is_queue_paused: false,
            max_queue_size,
            average_service_time,
            client_timeout_minutes,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Queue configuration read-model, the only view of a business the
/// admission path needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    pub business_id: BusinessId,
    pub is_queue_active: bool,
    pub is_queue_paused: bool,
    pub max_queue_size: i64,
    pub average_service_time: i64,
    pub client_timeout_minutes: i64,
}

impl From<&Business> for QueueConfig {
    fn from(b: &Business) -> Self {
        Self {
            business_id: b.id.clone(),
            is_queue_active: b.is_queue_active,
            is_queue_paused: b.is_queue_paused,
            max_queue_size: b.max_queue_size,
            average_service_time: b.average_service_time,
            client_timeout_minutes: b.client_timeout_minutes,
        }
    }
}
