// src/models/contract.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contract_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Pending,
    Approved,
    Rejected,
}

// Declaração de contrato: o comprador informa que fechou com o parceiro.
// Depois de aprovada pelo admin, libera a avaliação do parceiro.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractDeclaration {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub partner_id: Uuid,
    pub user_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-03-15")]
    pub contract_date: NaiveDate,

    // Centavos
    #[schema(example = 2_400_000i64)]
    pub contract_value: i64,

    #[schema(example = "12 meses")]
    pub contract_period: Option<String>,
    pub comments: Option<String>,

    pub status: ContractStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Resultado da checagem de elegibilidade de avaliação.
// Sempre derivado do estado atual dos contratos, nunca cacheado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEligibility {
    pub eligible: bool,
    // De onde veio a elegibilidade: contrato aprovado ou oferta de checkout
    #[schema(example = "approved_contract")]
    pub reason: &'static str,
}
