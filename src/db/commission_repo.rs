// src/db/commission_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::reporting::ReferralReportRow};

// Fonte única dos relatórios de comissão: busca as linhas cruas e deixa
// a agregação para o service (sob demanda, sem cache).
#[derive(Clone)]
pub struct CommissionRepository {
    pool: PgPool,
}

impl CommissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn fetch_report_rows(
        &self,
        partner_id: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ReferralReportRow>, AppError> {
        let rows = sqlx::query_as::<_, ReferralReportRow>(
            r#"
            SELECT
                r.id AS referral_id,
                r.partner_id,
                p.company_name AS partner_name,
                o.category,
                r.status,
                r.expected_value,
                r.won_value,
                r.success_fee_expected,
                r.success_fee_realized,
                r.created_at,
                r.last_status_update
            FROM referrals r
            JOIN partners p ON p.id = r.partner_id
            JOIN offers o ON o.id = r.offer_id
            WHERE ($1::uuid IS NULL OR r.partner_id = $1)
              AND ($2::timestamptz IS NULL OR r.created_at >= $2)
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(partner_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
