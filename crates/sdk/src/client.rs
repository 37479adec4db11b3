//! Waitline Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ActivateQueueResponse, CallNextResponse, CancelEntryResponse, JoinQueueRequest,
    JoinQueueResponse, QueueStatusResponse, RegisterBusinessRequest, RegisterBusinessResponse,
    ServeEntryResponse, StatsResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

/// Waitline daemon client
///
/// # Example
///
/// ```no_run
/// use waitline_sdk::WaitlineClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WaitlineClient::connect("http://127.0.0.1:9620").await?;
/// # Ok(())
/// # }
/// ```
pub struct WaitlineClient {
    client: HttpClient,
}

impl WaitlineClient {
    /// Connect to a Waitline daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g. `http://127.0.0.1:9620`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url.as_ref())
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {e}")))?;

        Ok(Self { client })
    }

    /// Join a business's queue
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use waitline_sdk::{WaitlineClient, JoinQueueRequest};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = WaitlineClient::connect("http://127.0.0.1:9620").await?;
    /// let response = client.join_queue(JoinQueueRequest {
    ///     business_id: "a3e1...".to_string(),
    ///     phone: "+33600000001".to_string(),
    ///     client_name: "Alice".to_string(),
    /// }).await?;
    ///
    /// println!("Position: {}", response.entry.position);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn join_queue(&self, request: JoinQueueRequest) -> Result<JoinQueueResponse> {
        let mut params = ObjectParams::new();
        params.insert("business_id", &request.business_id)?;
        params.insert("phone", &request.phone)?;
        params.insert("client_name", &request.client_name)?;

        let response = self.client.request("queue.join.v1", params).await?;
        Ok(response)
    }

    /// Open or close a business's queue
    pub async fn set_queue_active(
        &self,
        business_id: impl Into<String>,
        active: bool,
    ) -> Result<ActivateQueueResponse> {
        let mut params = ObjectParams::new();
        params.insert("business_id", business_id.into())?;
        params.insert("is_queue_active", active)?;

        let response = self.client.request("queue.activate.v1", params).await?;
        Ok(response)
    }

    /// Current queue snapshot for a business
    pub async fn queue_status(
        &self,
        business_id: impl Into<String>,
    ) -> Result<QueueStatusResponse> {
        let mut params = ObjectParams::new();
        params.insert("business_id", business_id.into())?;

        let response = self.client.request("queue.status.v1", params).await?;
        Ok(response)
    }

    /// Call the next waiting client
    pub async fn call_next(&self, business_id: impl Into<String>) -> Result<CallNextResponse> {
        let mut params = ObjectParams::new();
        params.insert("business_id", business_id.into())?;

        let response = self.client.request("queue.next.v1", params).await?;
        Ok(response)
    }

    /// Mark a called client as served
    pub async fn mark_served(&self, entry_id: impl Into<String>) -> Result<ServeEntryResponse> {
        let mut params = ObjectParams::new();
        params.insert("entry_id", entry_id.into())?;

        let response = self.client.request("queue.serve.v1", params).await?;
        Ok(response)
    }

    /// Cancel a waiting entry
    pub async fn cancel_entry(&self, entry_id: impl Into<String>) -> Result<CancelEntryResponse> {
        let mut params = ObjectParams::new();
        params.insert("entry_id", entry_id.into())?;

        let response = self.client.request("queue.cancel.v1", params).await?;
        Ok(response)
    }

    /// Register a new business
    pub async fn register_business(
        &self,
        request: RegisterBusinessRequest,
    ) -> Result<RegisterBusinessResponse> {
        let mut params = ObjectParams::new();
        params.insert("name", &request.name)?;
        params.insert("business_type", &request.business_type)?;
        params.insert("phone", &request.phone)?;
        if let Some(size) = request.max_queue_size {
            params.insert("max_queue_size", size)?;
        }
        if let Some(avg) = request.average_service_time {
            params.insert("average_service_time", avg)?;
        }
        if let Some(timeout) = request.client_timeout_minutes {
            params.insert("client_timeout_minutes", timeout)?;
        }

        let response = self.client.request("business.register.v1", params).await?;
        Ok(response)
    }

    /// Engine statistics
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = self
            .client
            .request("admin.stats.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }
}
