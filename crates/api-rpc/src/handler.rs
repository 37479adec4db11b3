//! RPC Method Handlers
//!
//! Bridges the JSON-RPC surface to the application service.

use crate::error::{code, to_rpc_error};
use crate::rate_limiter::RateLimiter;
use crate::types::{
    ActivateQueueRequest, ActivateQueueResponse, CallNextRequest, CallNextResponse,
    CancelEntryRequest, CancelEntryResponse, JoinQueueRequest, JoinQueueResponse,
    MaintenanceRequest, MaintenanceResponse, QueueStatusRequest, QueueStatusResponse,
    RegisterBusinessRequest, RegisterBusinessResponse, ServeEntryRequest, ServeEntryResponse,
    StatsRequest, StatsResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use waitline_core::application::{registration, JoinRequest, RegisterRequest, WaitlineService};
use waitline_core::port::Maintenance;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<WaitlineService>,
    maintenance: Arc<dyn Maintenance>,
    rate_limiter: Arc<RateLimiter>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(service: Arc<WaitlineService>, maintenance: Arc<dyn Maintenance>) -> Self {
        // Default: 200 burst, 100 req/sec (configurable via env)
        let max_burst: u32 = std::env::var("WAITLINE_RATE_LIMIT_BURST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(200);

        let rate_per_sec: u32 = std::env::var("WAITLINE_RATE_LIMIT_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            service,
            maintenance,
            rate_limiter: Arc::new(RateLimiter::new(max_burst, rate_per_sec)),
            start_time: std::time::Instant::now(),
        }
    }

    fn throttle_check(&self, allowed: bool) -> Result<(), ErrorObjectOwned> {
        if allowed {
            Ok(())
        } else {
            Err(ErrorObjectOwned::owned(
                code::THROTTLED,
                "Rate limit exceeded. Please slow down.",
                None::<()>,
            ))
        }
    }

    /// queue.join.v1
    pub async fn join(
        &self,
        params: JoinQueueRequest,
    ) -> Result<JoinQueueResponse, ErrorObjectOwned> {
        self.throttle_check(self.rate_limiter.check().await)?;

        let entry = self
            .service
            .join_queue(JoinRequest {
                business_id: params.business_id,
                phone: params.phone,
                client_name: params.client_name,
            })
            .await
            .map_err(to_rpc_error)?;

        Ok(JoinQueueResponse {
            message: "You have been added to the queue".to_string(),
            entry: entry.into(),
        })
    }

    /// queue.activate.v1
    pub async fn activate(
        &self,
        params: ActivateQueueRequest,
    ) -> Result<ActivateQueueResponse, ErrorObjectOwned> {
        self.throttle_check(self.rate_limiter.check().await)?;

        self.service
            .set_queue_active(&params.business_id, params.is_queue_active)
            .await
            .map_err(to_rpc_error)?;

        let message = if params.is_queue_active {
            "Queue is now open"
        } else {
            "Queue is now closed"
        };

        Ok(ActivateQueueResponse {
            message: message.to_string(),
        })
    }

    /// queue.status.v1
    pub async fn status(
        &self,
        params: QueueStatusRequest,
    ) -> Result<QueueStatusResponse, ErrorObjectOwned> {
        let status = self
            .service
            .queue_status(&params.business_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(QueueStatusResponse {
            business_id: status.business_id,
            is_queue_active: status.is_queue_active,
            waiting_count: status.waiting_count,
            max_queue_size: status.max_queue_size,
            estimated_wait_time: status.estimated_wait_time,
        })
    }

    /// queue.next.v1
    pub async fn call_next(
        &self,
        params: CallNextRequest,
    ) -> Result<CallNextResponse, ErrorObjectOwned> {
        let entry = self
            .service
            .call_next(&params.business_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(CallNextResponse {
            message: format!("{} is up next", entry.client_name),
            entry: entry.into(),
        })
    }

    /// queue.serve.v1
    pub async fn serve(
        &self,
        params: ServeEntryRequest,
    ) -> Result<ServeEntryResponse, ErrorObjectOwned> {
        let entry = self
            .service
            .mark_served(&params.entry_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(ServeEntryResponse {
            entry: entry.into(),
        })
    }

    /// queue.cancel.v1
    pub async fn cancel(
        &self,
        params: CancelEntryRequest,
    ) -> Result<CancelEntryResponse, ErrorObjectOwned> {
        let entry = self
            .service
            .cancel_entry(&params.entry_id)
            .await
            .map_err(to_rpc_error)?;

        Ok(CancelEntryResponse {
            entry_id: entry.id,
            cancelled: true,
        })
    }

    /// business.register.v1
    pub async fn register_business(
        &self,
        params: RegisterBusinessRequest,
    ) -> Result<RegisterBusinessResponse, ErrorObjectOwned> {
        self.throttle_check(self.rate_limiter.check().await)?;

        let req = RegisterRequest {
            name: params.name,
            business_type: params.business_type,
            phone: params.phone,
            max_queue_size: params
                .max_queue_size
                .unwrap_or(registration::DEFAULT_MAX_QUEUE_SIZE),
            average_service_time: params
                .average_service_time
                .unwrap_or(registration::DEFAULT_AVERAGE_SERVICE_TIME),
            client_timeout_minutes: params
                .client_timeout_minutes
                .unwrap_or(registration::DEFAULT_CLIENT_TIMEOUT_MINUTES),
        };

        let business = self
            .service
            .register_business(req)
            .await
            .map_err(to_rpc_error)?;

        Ok(RegisterBusinessResponse {
            message: "Business registered".to_string(),
            business: business.into(),
        })
    }

    /// admin.stats.v1
    pub async fn stats(&self, _params: StatsRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let stats = self.maintenance.get_stats().await.map_err(to_rpc_error)?;

        Ok(StatsResponse {
            business_count: stats.business_count,
            entry_count: stats.entry_count,
            terminal_entry_count: stats.terminal_entry_count,
            db_size_bytes: stats.db_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }

    /// admin.maintenance.v1
    pub async fn maintenance(
        &self,
        params: MaintenanceRequest,
    ) -> Result<MaintenanceResponse, ErrorObjectOwned> {
        let stats_before = self.maintenance.get_stats().await.map_err(to_rpc_error)?;

        let vacuum_run = if params.force_vacuum || stats_before.fragmentation_percent > 10.0 {
            self.maintenance.vacuum().await.map_err(to_rpc_error)?;
            true
        } else {
            false
        };

        let entries_expired = self
            .maintenance
            .expire_stale_waiting()
            .await
            .map_err(to_rpc_error)?;

        let entries_deleted = self
            .maintenance
            .gc_terminal_entries(30)
            .await
            .map_err(to_rpc_error)?;

        let stats_after = self.maintenance.get_stats().await.map_err(to_rpc_error)?;

        Ok(MaintenanceResponse {
            vacuum_run,
            entries_expired,
            entries_deleted,
            db_size_before: stats_before.db_size_bytes,
            db_size_after: stats_after.db_size_bytes,
        })
    }
}
