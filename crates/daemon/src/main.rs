//! Waitline Daemon - Main Entry Point
//! Composition root: wires the SQLite adapters into the core service and
//! exposes the JSON-RPC surface.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use waitline_api_rpc::{RpcServer, RpcServerConfig};
use waitline_core::application::{MaintenanceScheduler, WaitlineService};
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{LogNotifier, MaintenanceConfig};
use waitline_infra_sqlite::{
    create_pool, run_migrations, SqliteBusinessRegistry, SqliteMaintenance, SqliteQueueStore,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.waitline/waitline.db";
const DEFAULT_RPC_PORT: u16 = 9620;
const MAINTENANCE_INTERVAL_MINUTES: u64 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (JSON format for production)
    let log_format = std::env::var("WAITLINE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("waitline=info"))
        .expect("Failed to create env filter");

    // Optional rolling file log next to the console output
    let mut file_guard = None;
    let file_layer = std::env::var("WAITLINE_LOG_DIR").ok().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "waitline.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);
        fmt::layer().with_ansi(false).with_writer(writer)
    });

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    match log_format.as_str() {
        "json" => registry.with(fmt::layer().json()).init(),
        _ => registry.with(fmt::layer().pretty()).init(),
    }

    info!("Waitline daemon v{} starting...", VERSION);

    // 2. Load configuration
    let db_path = std::env::var("WAITLINE_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: u16 = std::env::var("WAITLINE_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RPC_PORT);

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let notifier = Arc::new(LogNotifier);

    let business_registry = Arc::new(SqliteBusinessRegistry::new(pool.clone()));
    let queue_store = Arc::new(SqliteQueueStore::new(pool.clone()));
    let tx_queue_store = Arc::new(SqliteQueueStore::new(pool.clone()));

    let service = Arc::new(WaitlineService::new(
        business_registry,
        queue_store,
        tx_queue_store,
        id_provider,
        time_provider.clone(),
        notifier,
    ));

    let maintenance = Arc::new(SqliteMaintenance::new(pool.clone(), time_provider.clone()));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_server = RpcServer::new(rpc_config, service, maintenance.clone());
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    // 6. Start maintenance scheduler (stale-entry expiry + GC)
    info!("Starting maintenance scheduler...");
    let maintenance_scheduler = MaintenanceScheduler::new(
        maintenance,
        MaintenanceConfig::default(),
        MAINTENANCE_INTERVAL_MINUTES,
    );

    tokio::spawn(async move {
        maintenance_scheduler.run().await;
    });

    info!("System ready. Waiting for requests...");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    drop(file_guard);
    info!("Shutdown complete.");

    Ok(())
}
