// src/db/case_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::partner_case::PartnerCase};

#[derive(Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        partner_id: Uuid,
        title: &str,
        client_name: &str,
        segment: Option<&str>,
        summary: &str,
        results: Option<&str>,
        position: i32,
    ) -> Result<PartnerCase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let case = sqlx::query_as::<_, PartnerCase>(
            r#"
            INSERT INTO partner_cases (
                partner_id, title, client_name, segment, summary, results, position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(partner_id)
        .bind(title)
        .bind(client_name)
        .bind(segment)
        .bind(summary)
        .bind(results)
        .bind(position)
        .fetch_one(executor)
        .await?;

        Ok(case)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        title: &str,
        client_name: &str,
        segment: Option<&str>,
        summary: &str,
        results: Option<&str>,
        position: i32,
    ) -> Result<Option<PartnerCase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let case = sqlx::query_as::<_, PartnerCase>(
            r#"
            UPDATE partner_cases SET
                title = $2, client_name = $3, segment = $4,
                summary = $5, results = $6, position = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(client_name)
        .bind(segment)
        .bind(summary)
        .bind(results)
        .bind(position)
        .fetch_optional(executor)
        .await?;

        Ok(case)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM partner_cases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<PartnerCase>, AppError> {
        let cases = sqlx::query_as::<_, PartnerCase>(
            "SELECT * FROM partner_cases WHERE partner_id = $1 ORDER BY position ASC",
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cases)
    }

    pub async fn list_all(&self) -> Result<Vec<PartnerCase>, AppError> {
        let cases = sqlx::query_as::<_, PartnerCase>(
            "SELECT * FROM partner_cases ORDER BY partner_id, position ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cases)
    }
}
