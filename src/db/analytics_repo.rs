// src/db/analytics_repo.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::analytics::{AnalyticsEvent, AnalyticsEventType},
};

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_event<'e, E>(
        &self,
        executor: E,
        event_type: AnalyticsEventType,
        partner_id: Option<Uuid>,
        offer_id: Option<Uuid>,
        metadata: &Value,
    ) -> Result<AnalyticsEvent, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, AnalyticsEvent>(
            r#"
            INSERT INTO analytics_events (event_type, partner_id, offer_id, metadata)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(event_type)
        .bind(partner_id)
        .bind(offer_id)
        .bind(metadata)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    pub async fn count_events(
        &self,
        partner_id: Uuid,
        event_type: AnalyticsEventType,
        since: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM analytics_events
            WHERE partner_id = $1
              AND event_type = $2
              AND ($3::timestamptz IS NULL OR created_at >= $3)
            "#,
        )
        .bind(partner_id)
        .bind(event_type)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn list_events(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>, AppError> {
        let events = sqlx::query_as::<_, AnalyticsEvent>(
            r#"
            SELECT * FROM analytics_events
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
