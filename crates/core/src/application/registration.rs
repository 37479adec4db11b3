// Business Registration Use Case

use crate::domain::{Business, Phone, BUSINESS_TYPES};
use crate::error::{AppError, Result};
use crate::port::{BusinessRegistry, IdProvider, TimeProvider};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_QUEUE_SIZE: i64 = 50;
pub const DEFAULT_AVERAGE_SERVICE_TIME: i64 = 300;
pub const DEFAULT_CLIENT_TIMEOUT_MINUTES: i64 = 15;

/// Registration request as received from the outside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub business_type: String,
    pub phone: String,

    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: i64,
    /// Seconds per client
    #[serde(default = "default_average_service_time")]
    pub average_service_time: i64,
    #[serde(default = "default_client_timeout_minutes")]
    pub client_timeout_minutes: i64,
}

fn default_max_queue_size() -> i64 {
    DEFAULT_MAX_QUEUE_SIZE
}

fn default_average_service_time() -> i64 {
    DEFAULT_AVERAGE_SERVICE_TIME
}

fn default_client_timeout_minutes() -> i64 {
    DEFAULT_CLIENT_TIMEOUT_MINUTES
}

pub fn validate_request(req: &RegisterRequest) -> Result<Phone> {
    let name = req.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::Validation(
            "business name must be between 1 and 100 characters".to_string(),
        ));
    }
    if !BUSINESS_TYPES.contains(&req.business_type.as_str()) {
        return Err(AppError::Validation(format!(
            "unknown business type: {}",
            req.business_type
        )));
    }
    let phone = Phone::parse(&req.phone).map_err(AppError::Domain)?;
    if req.max_queue_size <= 0 {
        return Err(AppError::Validation(
            "max queue size must be positive".to_string(),
        ));
    }
    if req.average_service_time < 0 {
        return Err(AppError::Validation(
            "average service time must not be negative".to_string(),
        ));
    }
    if req.client_timeout_minutes <= 0 {
        return Err(AppError::Validation(
            "client timeout must be positive".to_string(),
        ));
    }
    Ok(phone)
}

/// Register a new business. The queue starts closed; activation is a
/// separate, explicit step.
pub async fn execute(
    registry: &dyn BusinessRegistry,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: RegisterRequest,
) -> Result<Business> {
    let phone = validate_request(&req)?;

    let business = Business::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        req.name.trim(),
        req.business_type,
        phone,
        req.max_queue_size,
        req.average_service_time,
        req.client_timeout_minutes,
    );

    registry.insert(&business).await?;

    tracing::info!(
        business_id = %business.id,
        name = %business.name,
        business_type = %business.business_type,
        "business registered"
    );

    Ok(business)
}
