// src/models/partner.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "curation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "partner_tier", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerTier {
    Standard,
    Premium,
}

// --- STRUCTS ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: Uuid,

    #[schema(example = "Acme Tecnologia")]
    pub company_name: String,

    #[schema(example = "Acme Tecnologia LTDA")]
    pub legal_name: String,

    // Sempre normalizado: 14 dígitos, sem máscara
    #[schema(example = "11222333000181")]
    pub cnpj: String,

    pub curation_status: CurationStatus,
    pub tier: PartnerTier,

    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,

    #[schema(example = "6201-5/01")]
    pub cnae_principal: Option<String>,
    pub cnae_secundario: Vec<String>,

    // Controle de concorrência otimista
    pub version: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Recorte público do parceiro: o que um comprador vê no perfil.
// Nada de contato direto nem status de curadoria.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPublicProfile {
    pub id: Uuid,
    pub company_name: String,
    pub tier: PartnerTier,
    pub website: Option<String>,
    pub description: Option<String>,
}

// Dados retornados pela consulta de CNPJ no registro externo
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CnpjRecord {
    pub cnpj: String,
    #[schema(example = "ACME TECNOLOGIA LTDA")]
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub cnae_principal: Option<String>,
    pub cnae_secundario: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}
