// src/db/referral_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::referral::{Referral, ReferralListEntry, ReferralStatus},
};

#[derive(Clone)]
pub struct ReferralRepository {
    pool: PgPool,
}

impl ReferralRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        offer_id: Uuid,
        partner_id: Uuid,
        buyer_name: &str,
        buyer_company: &str,
        buyer_email: &str,
        buyer_phone: Option<&str>,
        expected_value: i64,
        success_fee_expected: i64,
        ack_deadline: DateTime<Utc>,
        internal_notes: Option<&str>,
    ) -> Result<Referral, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (
                offer_id, partner_id,
                buyer_name, buyer_company, buyer_email, buyer_phone,
                expected_value, success_fee_expected,
                ack_deadline, internal_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(offer_id)
        .bind(partner_id)
        .bind(buyer_name)
        .bind(buyer_company)
        .bind(buyer_email)
        .bind(buyer_phone)
        .bind(expected_value)
        .bind(success_fee_expected)
        .bind(ack_deadline)
        .bind(internal_notes)
        .fetch_one(executor)
        .await?;

        Ok(referral)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Referral>, AppError> {
        let referral = sqlx::query_as::<_, Referral>("SELECT * FROM referrals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(referral)
    }

    /// Listagem com contexto. `partner_id` limita ao parceiro dono
    /// (painel do parceiro); staff passa None e enxerga tudo.
    pub async fn list(
        &self,
        partner_id: Option<Uuid>,
        status: Option<ReferralStatus>,
    ) -> Result<Vec<ReferralListEntry>, AppError> {
        let entries = sqlx::query_as::<_, ReferralListEntry>(
            r#"
            SELECT
                r.*,
                p.company_name AS partner_name,
                o.title AS offer_title
            FROM referrals r
            JOIN partners p ON p.id = r.partner_id
            JOIN offers o ON o.id = r.offer_id
            WHERE ($1::uuid IS NULL OR r.partner_id = $1)
              AND ($2::referral_status IS NULL OR r.status = $2)
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(partner_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Grava a transição de status com checagem otimista de version.
    /// None = nada gravado (registro mudou de version ou não existe).
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        expected_version: i32,
        new_status: ReferralStatus,
        won_value: Option<i64>,
        success_fee_realized: Option<i64>,
        internal_notes: Option<&str>,
    ) -> Result<Option<Referral>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            UPDATE referrals SET
                status = $3,
                won_value = COALESCE($4, won_value),
                success_fee_realized = COALESCE($5, success_fee_realized),
                internal_notes = COALESCE($6, internal_notes),
                version = version + 1,
                last_status_update = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_version)
        .bind(new_status)
        .bind(won_value)
        .bind(success_fee_realized)
        .bind(internal_notes)
        .fetch_optional(executor)
        .await?;

        Ok(referral)
    }

    /// Sweep do servidor: SENT com prazo estourado vira OVERDUE.
    /// Retorna quantas indicações venceram nesta passada.
    pub async fn sweep_overdue(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE referrals
            SET status = 'OVERDUE', version = version + 1, last_status_update = NOW()
            WHERE status = 'SENT' AND ack_deadline < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
