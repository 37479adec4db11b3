// SQLite BusinessRegistry Implementation

use crate::queue_store::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use waitline_core::domain::{Business, BusinessId, Phone, QueueConfig};
use waitline_core::error::Result;
use waitline_core::port::BusinessRegistry;

pub struct SqliteBusinessRegistry {
    pool: SqlitePool,
}

impl SqliteBusinessRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRegistry for SqliteBusinessRegistry {
    async fn insert(&self, business: &Business) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO businesses (
                id, name, business_type, phone,
                is_active, is_queue_active, is_queue_paused,
                max_queue_size, average_service_time, client_timeout_minutes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&business.id)
        .bind(&business.name)
        .bind(&business.business_type)
        .bind(business.phone.as_str())
        .bind(business.is_active as i64)
        .bind(business.is_queue_active as i64)
        .bind(business.is_queue_paused as i64)
        .bind(business.max_queue_size)
        .bind(business.average_service_time)
        .bind(business.client_timeout_minutes)
        .bind(business.created_at)
        .bind(business.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>(
            "SELECT * FROM businesses WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BusinessRow::into_business))
    }

    async fn queue_config(&self, id: &BusinessId) -> Result<Option<QueueConfig>> {
        let row: Option<(i64, i64, i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT is_queue_active, is_queue_paused, max_queue_size,
                   average_service_time, client_timeout_minutes
            FROM businesses
            WHERE id = ? AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(
            |(is_queue_active, is_queue_paused, max_queue_size, avg, timeout)| QueueConfig {
                business_id: id.clone(),
                is_queue_active: is_queue_active != 0,
                is_queue_paused: is_queue_paused != 0,
                max_queue_size,
                average_service_time: avg,
                client_timeout_minutes: timeout,
            },
        ))
    }

    async fn set_queue_active(
        &self,
        id: &BusinessId,
        active: bool,
        now_millis: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE businesses
            SET is_queue_active = ?, updated_at = ?
            WHERE id = ? AND is_active = 1
            "#,
        )
        .bind(active as i64)
        .bind(now_millis)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// SQLite row representation of a business
#[derive(Debug, sqlx::FromRow)]
struct BusinessRow {
    id: String,
    name: String,
    business_type: String,
    phone: String,
    is_active: i64,
    is_queue_active: i64,
    is_queue_paused: i64,
    max_queue_size: i64,
    average_service_time: i64,
    client_timeout_minutes: i64,
    created_at: i64,
    updated_at: i64,
}

impl BusinessRow {
    fn into_business(self) -> Business {
        Business {
            id: self.id,
            name: self.name,
            business_type: self.business_type,
            phone: Phone::from_trusted(self.phone),
            is_active: self.is_active != 0,
            is_queue_active: self.is_queue_active != 0,
            is_queue_paused: self.is_queue_paused != 0,
            max_queue_size: self.max_queue_size,
            average_service_time: self.average_service_time,
            client_timeout_minutes: self.client_timeout_minutes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
