//! Queue progression tests
//!
//! Position contiguity through arbitrary call/cancel interleavings, and
//! the forward-only status transitions at the service level.

use std::sync::Arc;

use waitline_core::application::{JoinRequest, RegisterRequest, WaitlineService};
use waitline_core::domain::EntryStatus;
use waitline_core::error::AppError;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{LogNotifier, QueueStore};
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteBusinessRegistry, SqliteQueueStore};

async fn setup() -> (Arc<SqliteQueueStore>, WaitlineService) {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqliteQueueStore::new(pool.clone()));
    let service = WaitlineService::new(
        Arc::new(SqliteBusinessRegistry::new(pool.clone())),
        store.clone(),
        Arc::new(SqliteQueueStore::new(pool)),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(LogNotifier),
    );
    (store, service)
}

async fn open_business(service: &WaitlineService) -> String {
    let business = service
        .register_business(RegisterRequest {
            name: "Salon".to_string(),
            business_type: "hairdresser".to_string(),
            phone: "+33140000001".to_string(),
            max_queue_size: 20,
            average_service_time: 600,
            client_timeout_minutes: 15,
        })
        .await
        .unwrap();
    service.set_queue_active(&business.id, true).await.unwrap();
    business.id
}

async fn join(service: &WaitlineService, biz: &str, n: usize) -> String {
    service
        .join_queue(JoinRequest {
            business_id: biz.to_string(),
            phone: format!("+336000000{n:02}"),
            client_name: format!("Client {n}"),
        })
        .await
        .unwrap()
        .id
}

/// Waiting positions must always be exactly {1, ..., count}.
async fn assert_contiguous(store: &SqliteQueueStore, biz: &str) {
    let waiting = store.list_waiting(&biz.to_string()).await.unwrap();
    let positions: Vec<i64> = waiting.iter().map(|e| e.position).collect();
    let expected: Vec<i64> = (1..=waiting.len() as i64).collect();
    assert_eq!(positions, expected, "positions must be contiguous 1..N");
}

#[tokio::test]
async fn test_call_next_renumbers() {
    let (store, service) = setup().await;
    let biz = open_business(&service).await;

    for n in 1..=4 {
        join(&service, &biz, n).await;
    }

    let called = service.call_next(&biz).await.unwrap();
    assert_eq!(called.status, EntryStatus::Called);
    assert_eq!(called.client_name, "Client 1");
    assert!(called.called_at.is_some());

    assert_contiguous(&store, &biz).await;

    // FIFO order: next call gets the original second joiner
    let called = service.call_next(&biz).await.unwrap();
    assert_eq!(called.client_name, "Client 2");
    assert_contiguous(&store, &biz).await;
}

#[tokio::test]
async fn test_cancel_middle_entry_renumbers() {
    let (store, service) = setup().await;
    let biz = open_business(&service).await;

    let mut ids = vec![];
    for n in 1..=5 {
        ids.push(join(&service, &biz, n).await);
    }

    // Cancel the middle entry, then one from the tail
    service.cancel_entry(&ids[2]).await.unwrap();
    assert_contiguous(&store, &biz).await;

    service.cancel_entry(&ids[4]).await.unwrap();
    assert_contiguous(&store, &biz).await;

    // Order of the survivors is unchanged
    let waiting = store.list_waiting(&biz.to_string()).await.unwrap();
    let names: Vec<&str> = waiting.iter().map(|e| e.client_name.as_str()).collect();
    assert_eq!(names, vec!["Client 1", "Client 2", "Client 4"]);
}

#[tokio::test]
async fn test_interleaved_joins_and_removals() {
    let (store, service) = setup().await;
    let biz = open_business(&service).await;

    let a = join(&service, &biz, 1).await;
    join(&service, &biz, 2).await;
    service.cancel_entry(&a).await.unwrap();
    assert_contiguous(&store, &biz).await;

    join(&service, &biz, 3).await;
    service.call_next(&biz).await.unwrap();
    assert_contiguous(&store, &biz).await;

    join(&service, &biz, 4).await;
    join(&service, &biz, 5).await;
    service.call_next(&biz).await.unwrap();
    assert_contiguous(&store, &biz).await;

    let status = service.queue_status(&biz).await.unwrap();
    assert_eq!(status.waiting_count, 2);
}

#[tokio::test]
async fn test_serve_requires_called() {
    let (_, service) = setup().await;
    let biz = open_business(&service).await;

    let id = join(&service, &biz, 1).await;

    // waiting -> served skips a state and is rejected
    let result = service.mark_served(&id).await;
    assert!(matches!(result, Err(AppError::Domain(_))));

    let called = service.call_next(&biz).await.unwrap();
    assert_eq!(called.id, id);

    let served = service.mark_served(&id).await.unwrap();
    assert_eq!(served.status, EntryStatus::Served);
    assert!(served.served_at.is_some());
}

#[tokio::test]
async fn test_cancel_called_entry_rejected() {
    let (_, service) = setup().await;
    let biz = open_business(&service).await;

    let id = join(&service, &biz, 1).await;
    service.call_next(&biz).await.unwrap();

    // called entries can only be served
    let result = service.cancel_entry(&id).await;
    assert!(matches!(result, Err(AppError::Domain(_))));
}

#[tokio::test]
async fn test_call_next_empty_queue() {
    let (_, service) = setup().await;
    let biz = open_business(&service).await;

    let result = service.call_next(&biz).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_call_next_unknown_business() {
    let (_, service) = setup().await;

    let result = service.call_next("no-such-id").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_closing_queue_keeps_waiting_entries() {
    let (store, service) = setup().await;
    let biz = open_business(&service).await;

    for n in 1..=3 {
        join(&service, &biz, n).await;
    }

    // Closing blocks new joins but never evicts
    service.set_queue_active(&biz, false).await.unwrap();

    let waiting = store.list_waiting(&biz.to_string()).await.unwrap();
    assert_eq!(waiting.len(), 3);
    assert_contiguous(&store, &biz).await;

    // Staff can still drain the queue while closed
    let called = service.call_next(&biz).await.unwrap();
    assert_eq!(called.client_name, "Client 1");
}
