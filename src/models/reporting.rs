// src/models/reporting.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::referral::ReferralStatus;

// Linha-base dos relatórios de comissão: uma indicação com o contexto
// que todo agregado precisa. É isso que o repositório busca; a soma
// acontece em memória, sob demanda (sem cache).
#[derive(Debug, Clone, FromRow)]
pub struct ReferralReportRow {
    pub referral_id: Uuid,
    pub partner_id: Uuid,
    pub partner_name: String,
    pub category: String,
    pub status: ReferralStatus,
    pub expected_value: i64,
    pub won_value: Option<i64>,
    pub success_fee_expected: i64,
    pub success_fee_realized: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub last_status_update: DateTime<Utc>,
}

// Cards do topo do dashboard financeiro
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    pub total_referrals: i64,
    pub total_previsto: i64,
    pub total_realizado: i64,
    pub leads_won: i64,
    pub leads_lost: i64,
    pub leads_in_progress: i64,
}

// Quebra por categoria de oferta
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[schema(example = "ERP")]
    pub category: String,
    pub total_leads: i64,
    pub leads_won: i64,
    pub leads_lost: i64,
    pub leads_in_progress: i64,
    pub total_value: i64,
    pub won_value: i64,
    // Em [0,1]; exatamente 0 quando não há leads
    pub conversion_rate: f64,
}

// Relatório de aging: indicações em andamento por faixa de idade
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgingBucket {
    #[schema(example = "0-7d")]
    pub label: &'static str,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    pub total: i64,
    pub buckets: Vec<AgingBucket>,
}

// Série mensal previsto x realizado (janela móvel de 12 meses)
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEvolutionPoint {
    #[schema(example = "2026-08")]
    pub month: String,
    pub total_previsto: i64,
    pub total_realizado: i64,
}

// Totais de um parceiro (ou de todos) para o relatório por parceiro
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCommissionReport {
    pub partner_id: Uuid,
    pub partner_name: String,
    pub total_referrals: i64,
    pub total_previsto: i64,
    pub total_realizado: i64,
}
