// DB Maintenance port

use crate::error::Result;
use async_trait::async_trait;

/// Database maintenance statistics
#[derive(Debug, Clone)]
pub struct MaintenanceStats {
    pub db_size_mb: f64,
    pub db_size_bytes: i64,
    pub entry_count: i64,
    pub terminal_entry_count: i64,
    pub business_count: i64,
    pub fragmentation_percent: f64,
}

/// Maintenance configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// Retention period for served/cancelled/expired entries (days)
    pub terminal_entry_retention_days: i64,

    /// Maximum DB size before forcing VACUUM (MB)
    pub max_db_size_mb: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            terminal_entry_retention_days: 30,
            max_db_size_mb: 500.0,
        }
    }
}

/// Database maintenance operations
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space and optimize DB
    ///
    /// # Returns
    /// Space reclaimed in MB
    async fn vacuum(&self) -> Result<f64>;

    /// Delete terminal entries older than the retention period
    ///
    /// # Returns
    /// Number of entries deleted
    async fn gc_terminal_entries(&self, retention_days: i64) -> Result<i64>;

    /// Expire waiting entries older than their business's client timeout,
    /// renumbering each affected queue.
    ///
    /// # Returns
    /// Number of entries expired
    async fn expire_stale_waiting(&self) -> Result<i64>;

    /// Get maintenance statistics
    async fn get_stats(&self) -> Result<MaintenanceStats>;

    /// Run full maintenance (expiry + GC + VACUUM when the DB outgrows the
    /// configured bound)
    async fn run_full_maintenance(&self, config: &MaintenanceConfig) -> Result<MaintenanceStats> {
        let stats_before = self.get_stats().await?;

        let expired = self.expire_stale_waiting().await?;

        let deleted = self
            .gc_terminal_entries(config.terminal_entry_retention_days)
            .await?;

        let reclaimed_mb = if stats_before.db_size_mb > config.max_db_size_mb {
            self.vacuum().await?
        } else {
            0.0
        };

        let stats_after = self.get_stats().await?;

        tracing::info!(
            expired_entries = expired,
            deleted_entries = deleted,
            reclaimed_mb = reclaimed_mb,
            db_size_mb = stats_after.db_size_mb,
            "Maintenance completed"
        );

        Ok(stats_after)
    }
}
