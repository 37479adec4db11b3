//! Concurrency and race condition tests
//!
//! Runs against file-backed databases so the pool's connections all see
//! the same data. The capacity and uniqueness invariants must hold no
//! matter how concurrent joins interleave; a loser may surface either the
//! reclassified admission error or a store-level busy error, but never an
//! over-admission.

use std::sync::Arc;
use tokio::task::JoinSet;

use waitline_core::application::{JoinRequest, RegisterRequest, WaitlineService};
use waitline_core::error::AppError;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{LogNotifier, QueueStore};
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteBusinessRegistry, SqliteQueueStore};

async fn setup(db_path: &str) -> (Arc<SqliteQueueStore>, Arc<WaitlineService>) {
    let _ = std::fs::remove_file(db_path);

    let pool = create_pool(db_path).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqliteQueueStore::new(pool.clone()));
    let service = Arc::new(WaitlineService::new(
        Arc::new(SqliteBusinessRegistry::new(pool.clone())),
        store.clone(),
        Arc::new(SqliteQueueStore::new(pool)),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(LogNotifier),
    ));
    (store, service)
}

async fn open_business(service: &WaitlineService, max_queue_size: i64) -> String {
    let business = service
        .register_business(RegisterRequest {
            name: "Busy Place".to_string(),
            business_type: "restaurant".to_string(),
            phone: "+33140000001".to_string(),
            max_queue_size,
            average_service_time: 300,
            client_timeout_minutes: 15,
        })
        .await
        .unwrap();
    service.set_queue_active(&business.id, true).await.unwrap();
    business.id
}

#[tokio::test]
async fn test_concurrent_joins_never_exceed_capacity() {
    let db_path = "/tmp/waitline_test_concurrent_capacity.db";
    let (store, service) = setup(db_path).await;
    let biz = open_business(&service, 5).await;

    // 10 clients race for 5 slots
    let mut tasks = JoinSet::new();
    for n in 0..10 {
        let service = Arc::clone(&service);
        let biz = biz.clone();
        tasks.spawn(async move {
            service
                .join_queue(JoinRequest {
                    business_id: biz,
                    phone: format!("+336000000{n:02}"),
                    client_name: format!("Client {n}"),
                })
                .await
        });
    }

    let mut successes = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap().is_ok() {
            successes += 1;
        }
    }

    // The capacity bound held no matter how the writes interleaved
    let waiting = store.count_waiting(&biz).await.unwrap();
    assert!(waiting <= 5, "capacity exceeded: {waiting} waiting");
    assert_eq!(successes, waiting, "every success is one waiting entry");

    // Positions of the winners are contiguous 1..N
    let entries = store.list_waiting(&biz).await.unwrap();
    let positions: Vec<i64> = entries.iter().map(|e| e.position).collect();
    let expected: Vec<i64> = (1..=waiting).collect();
    assert_eq!(positions, expected);

    // Fill the remaining slots sequentially; the bound lands exactly on 5
    for n in 10..20 {
        let result = service
            .join_queue(JoinRequest {
                business_id: biz.clone(),
                phone: format!("+336000000{n:02}"),
                client_name: format!("Client {n}"),
            })
            .await;
        if matches!(result, Err(AppError::QueueFull(_))) {
            break;
        }
        result.unwrap();
    }
    assert_eq!(store.count_waiting(&biz).await.unwrap(), 5);

    let overflow = service
        .join_queue(JoinRequest {
            business_id: biz.clone(),
            phone: "+33600000099".to_string(),
            client_name: "Late".to_string(),
        })
        .await;
    assert!(matches!(overflow, Err(AppError::QueueFull(_))));

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_concurrent_same_phone_single_entry() {
    let db_path = "/tmp/waitline_test_concurrent_duplicate.db";
    let (store, service) = setup(db_path).await;
    let biz = open_business(&service, 10).await;

    // 8 duplicate joins race; the partial unique index lets one through
    let mut tasks = JoinSet::new();
    for n in 0..8 {
        let service = Arc::clone(&service);
        let biz = biz.clone();
        tasks.spawn(async move {
            service
                .join_queue(JoinRequest {
                    business_id: biz,
                    phone: "+33600000001".to_string(),
                    client_name: format!("Impatient {n}"),
                })
                .await
        });
    }

    let mut successes = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1, "exactly one duplicate join may win");
    assert_eq!(store.count_waiting(&biz).await.unwrap(), 1);

    // With the dust settled, a repeat join reports the duplicate cleanly
    let repeat = service
        .join_queue(JoinRequest {
            business_id: biz.clone(),
            phone: "+33600000001".to_string(),
            client_name: "Again".to_string(),
        })
        .await;
    assert!(matches!(repeat, Err(AppError::DuplicateEntry(_))));

    let _ = std::fs::remove_file(db_path);
}

#[tokio::test]
async fn test_concurrent_call_next_unique_winners() {
    let db_path = "/tmp/waitline_test_concurrent_next.db";
    let (store, service) = setup(db_path).await;
    let biz = open_business(&service, 10).await;

    for n in 0..4 {
        service
            .join_queue(JoinRequest {
                business_id: biz.clone(),
                phone: format!("+336000000{n:02}"),
                client_name: format!("Client {n}"),
            })
            .await
            .unwrap();
    }

    // Two staff terminals calling at once must not call the same client
    let mut tasks = JoinSet::new();
    for _ in 0..2 {
        let service = Arc::clone(&service);
        let biz = biz.clone();
        tasks.spawn(async move { service.call_next(&biz).await });
    }

    let mut called_ids = vec![];
    while let Some(result) = tasks.join_next().await {
        if let Ok(entry) = result.unwrap() {
            called_ids.push(entry.id);
        }
    }

    called_ids.sort();
    called_ids.dedup();
    let called_count = 4 - store.count_waiting(&biz).await.unwrap();
    assert_eq!(
        called_ids.len() as i64,
        called_count,
        "each successful call removed a distinct client"
    );

    let _ = std::fs::remove_file(db_path);
}
