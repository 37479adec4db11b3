//! Admission control integration tests
//!
//! Covers capacity, duplicate suppression, closed queues, and the wait
//! estimate, end to end over the SQLite adapters.

use std::sync::Arc;

use waitline_core::application::{JoinRequest, RegisterRequest, WaitlineService};
use waitline_core::error::AppError;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::LogNotifier;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteBusinessRegistry, SqliteQueueStore};

async fn setup_service() -> WaitlineService {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    WaitlineService::new(
        Arc::new(SqliteBusinessRegistry::new(pool.clone())),
        Arc::new(SqliteQueueStore::new(pool.clone())),
        Arc::new(SqliteQueueStore::new(pool)),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(LogNotifier),
    )
}

/// Registers a business, opens its queue, returns its id.
async fn open_business(
    service: &WaitlineService,
    max_queue_size: i64,
    average_service_time: i64,
) -> String {
    let business = service
        .register_business(RegisterRequest {
            name: "Test Business".to_string(),
            business_type: "other".to_string(),
            phone: "+33140000001".to_string(),
            max_queue_size,
            average_service_time,
            client_timeout_minutes: 15,
        })
        .await
        .unwrap();

    service.set_queue_active(&business.id, true).await.unwrap();
    business.id
}

fn join(business_id: &str, phone: &str, name: &str) -> JoinRequest {
    JoinRequest {
        business_id: business_id.to_string(),
        phone: phone.to_string(),
        client_name: name.to_string(),
    }
}

#[tokio::test]
async fn test_admission_scenario() {
    // max_queue_size=2, average_service_time=300s, queue open, empty
    let service = setup_service().await;
    let biz = open_business(&service, 2, 300).await;

    let alice = service
        .join_queue(join(&biz, "+33600000001", "Alice"))
        .await
        .unwrap();
    assert_eq!(alice.position, 1);
    assert_eq!(alice.estimated_wait_time, 0);

    let bob = service
        .join_queue(join(&biz, "+33600000002", "Bob"))
        .await
        .unwrap();
    assert_eq!(bob.position, 2);
    assert_eq!(bob.estimated_wait_time, 5); // 1 * 300s / 60

    // Queue is at capacity
    let carl = service.join_queue(join(&biz, "+33600000003", "Carl")).await;
    assert!(matches!(carl, Err(AppError::QueueFull(_))));

    // Alice is still waiting; a repeat join with her phone is a duplicate
    let alice_again = service
        .join_queue(join(&biz, "+33600000001", "Alice2"))
        .await;
    assert!(matches!(alice_again, Err(AppError::DuplicateEntry(_))));
}

#[tokio::test]
async fn test_unknown_business_wins_over_bad_phone() {
    let service = setup_service().await;

    // Precondition order: business existence is checked before the phone
    let result = service.join_queue(join("no-such-id", "bad", "Alice")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_closed_queue_rejects_joins() {
    let service = setup_service().await;
    let biz = open_business(&service, 5, 300).await;

    service.set_queue_active(&biz, false).await.unwrap();

    // Closed wins regardless of capacity or duplicate state
    let result = service.join_queue(join(&biz, "+33600000001", "Alice")).await;
    assert!(matches!(result, Err(AppError::QueueClosed(_))));

    // Closed also wins over a bad phone
    let result = service.join_queue(join(&biz, "bad", "Alice")).await;
    assert!(matches!(result, Err(AppError::QueueClosed(_))));
}

#[tokio::test]
async fn test_queue_never_registered_as_open() {
    let service = setup_service().await;
    let business = service
        .register_business(RegisterRequest {
            name: "Fresh".to_string(),
            business_type: "bakery".to_string(),
            phone: "+33140000002".to_string(),
            max_queue_size: 5,
            average_service_time: 60,
            client_timeout_minutes: 15,
        })
        .await
        .unwrap();

    // Queues start closed until explicitly opened
    let result = service
        .join_queue(join(&business.id, "+33600000001", "Alice"))
        .await;
    assert!(matches!(result, Err(AppError::QueueClosed(_))));
}

#[tokio::test]
async fn test_invalid_phone_rejected_before_store() {
    let service = setup_service().await;
    let biz = open_business(&service, 5, 300).await;

    for phone in ["123", "not-a-number", "+3360000000000099"] {
        let result = service.join_queue(join(&biz, phone, "Alice")).await;
        assert!(
            matches!(result, Err(AppError::Domain(_))),
            "phone {phone:?} should be rejected"
        );
    }

    // Nothing was admitted
    let status = service.queue_status(&biz).await.unwrap();
    assert_eq!(status.waiting_count, 0);
}

#[tokio::test]
async fn test_empty_client_name_rejected() {
    let service = setup_service().await;
    let biz = open_business(&service, 5, 300).await;

    let result = service.join_queue(join(&biz, "+33600000001", "  ")).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_wait_estimate_truncates() {
    // average_service_time = 90s: waits are floor(k * 90 / 60)
    let service = setup_service().await;
    let biz = open_business(&service, 10, 90).await;

    let expected = [0, 1, 3, 4, 6];
    for (i, want) in expected.iter().enumerate() {
        let entry = service
            .join_queue(join(&biz, &format!("+3360000000{i}"), "Client"))
            .await
            .unwrap();
        assert_eq!(entry.position, i as i64 + 1);
        assert_eq!(entry.estimated_wait_time, *want, "k={i}");
    }
}

#[tokio::test]
async fn test_rejoin_after_cancel() {
    let service = setup_service().await;
    let biz = open_business(&service, 5, 300).await;

    let entry = service
        .join_queue(join(&biz, "+33600000001", "Alice"))
        .await
        .unwrap();

    service.cancel_entry(&entry.id).await.unwrap();

    // The waiting entry is gone, so the same phone may join again
    let rejoined = service
        .join_queue(join(&biz, "+33600000001", "Alice"))
        .await
        .unwrap();
    assert_eq!(rejoined.position, 1);
}

#[tokio::test]
async fn test_capacity_frees_up_after_call() {
    let service = setup_service().await;
    let biz = open_business(&service, 1, 300).await;

    service
        .join_queue(join(&biz, "+33600000001", "Alice"))
        .await
        .unwrap();

    let full = service.join_queue(join(&biz, "+33600000002", "Bob")).await;
    assert!(matches!(full, Err(AppError::QueueFull(_))));

    // Calling Alice removes her from the waiting set
    service.call_next(&biz).await.unwrap();

    let bob = service
        .join_queue(join(&biz, "+33600000002", "Bob"))
        .await
        .unwrap();
    assert_eq!(bob.position, 1);
}
