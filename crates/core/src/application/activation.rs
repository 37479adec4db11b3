// Queue Activation Use Case

use crate::error::{AppError, Result};
use crate::port::{BusinessRegistry, TimeProvider};

/// Open or close a business's queue.
///
/// Closing only blocks new joins; entries already waiting are untouched.
pub async fn execute(
    registry: &dyn BusinessRegistry,
    time_provider: &dyn TimeProvider,
    business_id: &str,
    active: bool,
) -> Result<()> {
    let now = time_provider.now_millis();
    let updated = registry.set_queue_active(&business_id.to_string(), active, now).await?;

    if !updated {
        return Err(AppError::NotFound(format!(
            "business {business_id} not found"
        )));
    }

    tracing::info!(business_id, active, "queue activation changed");
    Ok(())
}
