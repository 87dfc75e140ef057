// src/models/analytics.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "analytics_event_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsEventType {
    ProfileView,
    OfferView,
    LeadSubmit,
    CheckoutClick,
}

impl AnalyticsEventType {
    /// Rótulo no formato do wire (o mesmo do enum do banco).
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventType::ProfileView => "PROFILE_VIEW",
            AnalyticsEventType::OfferView => "OFFER_VIEW",
            AnalyticsEventType::LeadSubmit => "LEAD_SUBMIT",
            AnalyticsEventType::CheckoutClick => "CHECKOUT_CLICK",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub event_type: AnalyticsEventType,
    pub partner_id: Option<Uuid>,
    pub offer_id: Option<Uuid>,

    // Payload livre do cliente (origem, campanha, device...)
    pub metadata: Value,

    pub created_at: DateTime<Utc>,
}

// Métricas agregadas do painel do parceiro
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMetrics {
    pub profile_views: i64,
    pub offer_views: i64,
    pub leads_submitted: i64,
    pub checkout_clicks: i64,

    // leads / visualizações de oferta, em [0,1]; 0 sem visualizações
    pub lead_conversion_rate: f64,
}

impl PartnerMetrics {
    pub fn from_counts(
        profile_views: i64,
        offer_views: i64,
        leads_submitted: i64,
        checkout_clicks: i64,
    ) -> Self {
        let lead_conversion_rate = if offer_views > 0 {
            leads_submitted as f64 / offer_views as f64
        } else {
            0.0
        };
        Self {
            profile_views,
            offer_views,
            leads_submitted,
            checkout_clicks,
            lead_conversion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversao_sem_visualizacoes_e_zero() {
        let metrics = PartnerMetrics::from_counts(10, 0, 0, 0);
        assert_eq!(metrics.lead_conversion_rate, 0.0);
    }

    #[test]
    fn conversao_e_leads_sobre_visualizacoes() {
        let metrics = PartnerMetrics::from_counts(0, 200, 30, 5);
        assert!((metrics.lead_conversion_rate - 0.15).abs() < 1e-9);
    }
}
