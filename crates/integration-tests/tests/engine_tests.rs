//! End-to-end engine tests: registration, status, persistence across a
//! daemon restart, and a full client journey.

use std::sync::Arc;

use waitline_core::application::{JoinRequest, RegisterRequest, WaitlineService};
use waitline_core::domain::EntryStatus;
use waitline_core::error::AppError;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{LogNotifier, Maintenance, QueueStore};
use waitline_infra_sqlite::{
    create_pool, run_migrations, SqliteBusinessRegistry, SqliteMaintenance, SqliteQueueStore,
};

fn service_over(pool: sqlx::SqlitePool) -> WaitlineService {
    WaitlineService::new(
        Arc::new(SqliteBusinessRegistry::new(pool.clone())),
        Arc::new(SqliteQueueStore::new(pool.clone())),
        Arc::new(SqliteQueueStore::new(pool)),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(LogNotifier),
    )
}

async fn setup_service() -> WaitlineService {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    service_over(pool)
}

#[tokio::test]
async fn test_registration_validation() {
    let service = setup_service().await;

    let valid = RegisterRequest {
        name: "Pharmacie du Port".to_string(),
        business_type: "pharmacy".to_string(),
        phone: "+33140000001".to_string(),
        max_queue_size: 10,
        average_service_time: 240,
        client_timeout_minutes: 20,
    };

    let business = service.register_business(valid.clone()).await.unwrap();
    assert!(!business.id.is_empty());
    assert!(!business.is_queue_active);
    assert_eq!(business.max_queue_size, 10);

    let mut bad_type = valid.clone();
    bad_type.business_type = "rocket_silo".to_string();
    assert!(matches!(
        service.register_business(bad_type).await,
        Err(AppError::Validation(_))
    ));

    let mut bad_phone = valid.clone();
    bad_phone.phone = "12".to_string();
    assert!(matches!(
        service.register_business(bad_phone).await,
        Err(AppError::Domain(_))
    ));

    let mut bad_size = valid;
    bad_size.max_queue_size = -3;
    assert!(matches!(
        service.register_business(bad_size).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn test_queue_status_tracks_joins() {
    let service = setup_service().await;

    let business = service
        .register_business(RegisterRequest {
            name: "Garage Nord".to_string(),
            business_type: "garage".to_string(),
            phone: "+33140000002".to_string(),
            max_queue_size: 4,
            average_service_time: 1200,
            client_timeout_minutes: 60,
        })
        .await
        .unwrap();
    service
        .set_queue_active(&business.id, true)
        .await
        .unwrap();

    let status = service.queue_status(&business.id).await.unwrap();
    assert!(status.is_queue_active);
    assert_eq!(status.waiting_count, 0);
    assert_eq!(status.estimated_wait_time, 0);

    for n in 0..2 {
        service
            .join_queue(JoinRequest {
                business_id: business.id.clone(),
                phone: format!("+336000000{n:02}"),
                client_name: format!("Client {n}"),
            })
            .await
            .unwrap();
    }

    // 2 waiting at 1200s each: the next joiner would wait 40 minutes
    let status = service.queue_status(&business.id).await.unwrap();
    assert_eq!(status.waiting_count, 2);
    assert_eq!(status.max_queue_size, 4);
    assert_eq!(status.estimated_wait_time, 40);

    let missing = service.queue_status("no-such-id").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_waiting_entries_survive_restart() {
    let db_path = "/tmp/waitline_test_restart.db";
    let _ = std::fs::remove_file(db_path);

    let business_id;
    {
        let pool = create_pool(db_path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let service = service_over(pool);

        let business = service
            .register_business(RegisterRequest {
                name: "Boulangerie".to_string(),
                business_type: "bakery".to_string(),
                phone: "+33140000003".to_string(),
                max_queue_size: 10,
                average_service_time: 120,
                client_timeout_minutes: 15,
            })
            .await
            .unwrap();
        business_id = business.id;
        service.set_queue_active(&business_id, true).await.unwrap();

        for n in 0..3 {
            service
                .join_queue(JoinRequest {
                    business_id: business_id.clone(),
                    phone: format!("+336000000{n:02}"),
                    client_name: format!("Client {n}"),
                })
                .await
                .unwrap();
        }
        // Pool dropped: simulates daemon shutdown
    }

    {
        let pool = create_pool(db_path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let store = SqliteQueueStore::new(pool.clone());
        let service = service_over(pool);

        let waiting = store.list_waiting(&business_id).await.unwrap();
        assert_eq!(waiting.len(), 3);
        let positions: Vec<i64> = waiting.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);

        // The queue keeps working where it left off
        let entry = service
            .join_queue(JoinRequest {
                business_id: business_id.clone(),
                phone: "+33600000099".to_string(),
                client_name: "After Restart".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(entry.position, 4);
    }

    std::fs::remove_file(db_path).unwrap();
}

#[tokio::test]
async fn test_full_client_journey() {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let service = service_over(pool.clone());
    let maintenance = SqliteMaintenance::new(pool, Arc::new(SystemTimeProvider));

    let business = service
        .register_business(RegisterRequest {
            name: "Barber Bros".to_string(),
            business_type: "barber".to_string(),
            phone: "+33140000004".to_string(),
            max_queue_size: 3,
            average_service_time: 900,
            client_timeout_minutes: 30,
        })
        .await
        .unwrap();
    service
        .set_queue_active(&business.id, true)
        .await
        .unwrap();

    let alice = service
        .join_queue(JoinRequest {
            business_id: business.id.clone(),
            phone: "+33600000001".to_string(),
            client_name: "Alice".to_string(),
        })
        .await
        .unwrap();
    let bob = service
        .join_queue(JoinRequest {
            business_id: business.id.clone(),
            phone: "+33600000002".to_string(),
            client_name: "Bob".to_string(),
        })
        .await
        .unwrap();
    assert_eq!((alice.position, bob.position), (1, 2));

    // Alice is called, then served
    let called = service.call_next(&business.id).await.unwrap();
    assert_eq!(called.id, alice.id);
    let served = service.mark_served(&alice.id).await.unwrap();
    assert_eq!(served.status, EntryStatus::Served);

    // Bob moved up to position 1
    let status = service.queue_status(&business.id).await.unwrap();
    assert_eq!(status.waiting_count, 1);

    let stats = maintenance.get_stats().await.unwrap();
    assert_eq!(stats.business_count, 1);
    assert_eq!(stats.entry_count, 2);
    assert_eq!(stats.terminal_entry_count, 1);
}
