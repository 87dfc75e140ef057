// src/db/lead_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::lead::LeadRequest};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        offer_id: Uuid,
        contact_name: &str,
        contact_company: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
        message: Option<&str>,
        consent: bool,
    ) -> Result<LeadRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lead = sqlx::query_as::<_, LeadRequest>(
            r#"
            INSERT INTO lead_requests (
                offer_id, contact_name, contact_company,
                contact_email, contact_phone, message, consent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(offer_id)
        .bind(contact_name)
        .bind(contact_company)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(message)
        .bind(consent)
        .fetch_one(executor)
        .await?;

        Ok(lead)
    }

    /// Leads de uma oferta (ou todos), mais recentes primeiro.
    pub async fn list(&self, offer_id: Option<Uuid>) -> Result<Vec<LeadRequest>, AppError> {
        let leads = sqlx::query_as::<_, LeadRequest>(
            r#"
            SELECT * FROM lead_requests
            WHERE ($1::uuid IS NULL OR offer_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }
}
