// src/models/favorite.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Favorito do comprador, já com o recorte da oferta para a listagem
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub offer_id: Uuid,
    pub offer_title: String,
    pub offer_category: String,
    pub partner_name: String,
    pub favorited_at: DateTime<Utc>,
}
