//! Waitline CLI - Command-line interface for the Waitline queue engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9620";

#[derive(Parser)]
#[command(name = "waitline")]
#[command(about = "Waitline queue engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "WAITLINE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new business
    Register {
        /// Business name
        #[arg(short, long)]
        name: String,

        /// Business type (e.g. bakery, pharmacy, garage)
        #[arg(short = 't', long)]
        business_type: String,

        /// Contact phone number (international format)
        #[arg(short, long)]
        phone: String,

        /// Maximum queue size
        #[arg(long)]
        max_queue_size: Option<i64>,

        /// Average service time in seconds
        #[arg(long)]
        average_service_time: Option<i64>,
    },

    /// Join a business's queue
    Join {
        /// Business ID
        business_id: String,

        /// Client phone number (international format)
        #[arg(short, long)]
        phone: String,

        /// Client name
        #[arg(short, long)]
        name: String,
    },

    /// Open a business's queue for new joins
    Open {
        /// Business ID
        business_id: String,
    },

    /// Close a business's queue to new joins
    Close {
        /// Business ID
        business_id: String,
    },

    /// Show a queue snapshot
    Status {
        /// Business ID
        business_id: String,
    },

    /// Call the next waiting client
    Next {
        /// Business ID
        business_id: String,
    },

    /// Mark a called client as served
    Serve {
        /// Entry ID
        entry_id: String,
    },

    /// Cancel a waiting entry
    Cancel {
        /// Entry ID
        entry_id: String,
    },

    /// Show engine statistics
    Stats,

    /// Run maintenance operations
    Maintenance {
        /// Force VACUUM even if not needed
        #[arg(long)]
        force_vacuum: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct EntryResult {
    id: String,
    position: i64,
    estimated_wait_time: i64,
    status: String,
}

#[derive(Deserialize, Tabled)]
struct StatusResult {
    business_id: String,
    is_queue_active: bool,
    waiting_count: i64,
    max_queue_size: i64,
    estimated_wait_time: i64,
}

#[derive(Deserialize, Tabled)]
struct StatsResult {
    business_count: i64,
    entry_count: i64,
    terminal_entry_count: i64,
    db_size_bytes: i64,
    uptime_seconds: i64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Register {
            name,
            business_type,
            phone,
            max_queue_size,
            average_service_time,
        } => {
            let mut params = json!({
                "name": name,
                "business_type": business_type,
                "phone": phone,
            });
            if let Some(size) = max_queue_size {
                params["max_queue_size"] = json!(size);
            }
            if let Some(avg) = average_service_time {
                params["average_service_time"] = json!(avg);
            }

            let result = call_rpc(&cli.rpc_url, "business.register.v1", params).await?;
            let id = result["business"]["id"].as_str().unwrap_or("?").to_string();

            println!("{}", "✓ Business registered".green().bold());
            println!("  id: {id}");
            println!("  (the queue starts closed; run `waitline open {id}`)");
        }

        Commands::Join {
            business_id,
            phone,
            name,
        } => {
            let params = json!({
                "business_id": business_id,
                "phone": phone,
                "client_name": name,
            });

            let result = call_rpc(&cli.rpc_url, "queue.join.v1", params).await?;
            let entry: EntryResult = serde_json::from_value(result["entry"].clone())?;

            println!("{}", "✓ Added to the queue".green().bold());
            println!();
            println!("{}", Table::new(vec![entry]));
        }

        Commands::Open { business_id } => {
            let params = json!({ "business_id": business_id, "is_queue_active": true });
            call_rpc(&cli.rpc_url, "queue.activate.v1", params).await?;
            println!("{}", format!("✓ Queue {business_id} is open").green().bold());
        }

        Commands::Close { business_id } => {
            let params = json!({ "business_id": business_id, "is_queue_active": false });
            call_rpc(&cli.rpc_url, "queue.activate.v1", params).await?;
            println!(
                "{}",
                format!("✓ Queue {business_id} is closed").yellow().bold()
            );
        }

        Commands::Status { business_id } => {
            let params = json!({ "business_id": business_id });
            let result = call_rpc(&cli.rpc_url, "queue.status.v1", params).await?;
            let status: StatusResult = serde_json::from_value(result)?;

            println!("{}", "Queue Status".cyan().bold());
            println!();
            println!("{}", Table::new(vec![status]));
        }

        Commands::Next { business_id } => {
            let params = json!({ "business_id": business_id });
            let result = call_rpc(&cli.rpc_url, "queue.next.v1", params).await?;

            let message = result["message"].as_str().unwrap_or("").to_string();
            let entry: EntryResult = serde_json::from_value(result["entry"].clone())?;

            println!("{}", format!("✓ {message}").green().bold());
            println!();
            println!("{}", Table::new(vec![entry]));
        }

        Commands::Serve { entry_id } => {
            let params = json!({ "entry_id": entry_id });
            call_rpc(&cli.rpc_url, "queue.serve.v1", params).await?;
            println!("{}", format!("✓ Entry {entry_id} served").green().bold());
        }

        Commands::Cancel { entry_id } => {
            let params = json!({ "entry_id": entry_id });
            call_rpc(&cli.rpc_url, "queue.cancel.v1", params).await?;
            println!("{}", format!("✓ Entry {entry_id} cancelled").yellow().bold());
        }

        Commands::Stats => {
            let result = call_rpc(&cli.rpc_url, "admin.stats.v1", json!({})).await?;
            let stats: StatsResult = serde_json::from_value(result)?;

            println!("{}", "Engine Statistics".cyan().bold());
            println!();
            println!("{}", Table::new(vec![stats]));
        }

        Commands::Maintenance { force_vacuum } => {
            let params = json!({ "force_vacuum": force_vacuum });
            let result = call_rpc(&cli.rpc_url, "admin.maintenance.v1", params).await?;

            println!("{}", "✓ Maintenance completed".green().bold());
            println!(
                "  expired: {}, deleted: {}, vacuum: {}",
                result["entries_expired"],
                result["entries_deleted"],
                result["vacuum_run"]
            );
        }
    }

    Ok(())
}
