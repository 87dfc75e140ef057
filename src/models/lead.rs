// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Pedido de contato vindo do formulário público de uma oferta.
// O consentimento LGPD fica registrado junto; o disparo de e-mail é externo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub id: Uuid,
    pub offer_id: Uuid,

    pub contact_name: String,
    pub contact_company: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub message: Option<String>,

    pub consent: bool,
    pub created_at: DateTime<Utc>,
}
