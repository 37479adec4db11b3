// Maintenance Scheduler
// Periodic stale-entry expiry, terminal-entry GC, and VACUUM

use crate::error::Result;
use crate::port::{Maintenance, MaintenanceConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info};

/// Runs the full maintenance pass on a fixed interval.
pub struct MaintenanceScheduler {
    maintenance: Arc<dyn Maintenance>,
    config: MaintenanceConfig,
    interval_minutes: u64,
}

impl MaintenanceScheduler {
    pub fn new(
        maintenance: Arc<dyn Maintenance>,
        config: MaintenanceConfig,
        interval_minutes: u64,
    ) -> Self {
        Self {
            maintenance,
            config,
            interval_minutes,
        }
    }

    /// Maintenance loop; spawn with tokio::spawn.
    ///
    /// Stale-waiting expiry has to run often enough to honor each
    /// business's client timeout, so the interval is minutes, not hours.
    pub async fn run(self) {
        info!(
            interval_minutes = self.interval_minutes,
            retention_days = self.config.terminal_entry_retention_days,
            "Maintenance scheduler started"
        );

        let mut tick = interval(Duration::from_secs(self.interval_minutes * 60));

        loop {
            tick.tick().await;

            match self.maintenance.run_full_maintenance(&self.config).await {
                Ok(stats) => {
                    info!(
                        db_size_mb = stats.db_size_mb,
                        entries = stats.entry_count,
                        terminal_entries = stats.terminal_entry_count,
                        "Scheduled maintenance completed"
                    );
                }
                Err(e) => {
                    error!(error = ?e, "Scheduled maintenance failed");
                }
            }
        }
    }

    /// Run one maintenance pass immediately (manual trigger)
    pub async fn run_now(&self) -> Result<()> {
        let stats = self.maintenance.run_full_maintenance(&self.config).await?;
        info!(
            db_size_mb = stats.db_size_mb,
            entries = stats.entry_count,
            "Manual maintenance completed"
        );
        Ok(())
    }
}
