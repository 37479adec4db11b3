//! JSON-RPC Server
//!
//! JSON-RPC 2.0 over TCP, bound to localhost only.

use crate::handler::RpcHandler;
use crate::types::{
    ActivateQueueRequest, CallNextRequest, CancelEntryRequest, JoinQueueRequest,
    MaintenanceRequest, QueueStatusRequest, RegisterBusinessRequest, ServeEntryRequest,
    StatsRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use tracing::info;
use waitline_core::application::WaitlineService;
use waitline_core::port::Maintenance;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9620;

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        service: Arc<WaitlineService>,
        maintenance: Arc<dyn Maintenance>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(service, maintenance)),
        }
    }

    /// Start the JSON-RPC server.
    ///
    /// Security: only binds to 127.0.0.1 by default (no external access).
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {addr}: {e}"))?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("queue.join.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: JoinQueueRequest = params.parse()?;
                    handler.join(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.activate.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ActivateQueueRequest = params.parse()?;
                    handler.activate(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.status.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: QueueStatusRequest = params.parse()?;
                    handler.status(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.next.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CallNextRequest = params.parse()?;
                    handler.call_next(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.serve.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ServeEntryRequest = params.parse()?;
                    handler.serve(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.cancel.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CancelEntryRequest = params.parse()?;
                    handler.cancel(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("business.register.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: RegisterBusinessRequest = params.parse()?;
                    handler.register_business(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.stats.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: StatsRequest = params.parse()?;
                    handler.stats(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.maintenance.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: MaintenanceRequest = params.parse()?;
                    handler.maintenance(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!("JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(handle)
    }
}
