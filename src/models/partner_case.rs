// src/models/partner_case.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Case de sucesso exibido no perfil do parceiro. Gestão é do admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCase {
    pub id: Uuid,
    pub partner_id: Uuid,

    #[schema(example = "Implantação de CRM em 90 dias")]
    pub title: String,
    #[schema(example = "Metalúrgica Andrade")]
    pub client_name: String,
    #[schema(example = "Indústria")]
    pub segment: Option<String>,

    pub summary: String,
    pub results: Option<String>,

    // Ordem de exibição no perfil
    pub position: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
