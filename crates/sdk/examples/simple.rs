//! Minimal SDK usage: register a business, open its queue, join it.
//!
//! Run the daemon first, then: cargo run --example simple -p waitline-sdk

use waitline_sdk::{JoinQueueRequest, RegisterBusinessRequest, WaitlineClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = WaitlineClient::connect("http://127.0.0.1:9620").await?;

    let registered = client
        .register_business(RegisterBusinessRequest {
            name: "Boulangerie Martin".to_string(),
            business_type: "bakery".to_string(),
            phone: "+33140000001".to_string(),
            max_queue_size: Some(10),
            average_service_time: Some(180),
            client_timeout_minutes: None,
        })
        .await?;

    let business_id = registered.business.id;
    println!("registered business {business_id}");

    client.set_queue_active(&business_id, true).await?;

    let joined = client
        .join_queue(JoinQueueRequest {
            business_id: business_id.clone(),
            phone: "+33600000001".to_string(),
            client_name: "Alice".to_string(),
        })
        .await?;

    println!(
        "{} - position {} (~{} min)",
        joined.message, joined.entry.position, joined.entry.estimated_wait_time
    );

    let status = client.queue_status(&business_id).await?;
    println!(
        "{}/{} waiting, open: {}",
        status.waiting_count, status.max_queue_size, status.is_queue_active
    );

    Ok(())
}
