// src/services/analytics_service.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AnalyticsRepository,
    models::{
        analytics::{AnalyticsEvent, AnalyticsEventType, PartnerMetrics},
        auth::AuthContext,
    },
};

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Ingestão de evento do frontend. Best-effort por natureza: o
    /// cliente não re-tenta, e o metadata entra como chegou.
    pub async fn track(
        &self,
        event_type: AnalyticsEventType,
        partner_id: Option<Uuid>,
        offer_id: Option<Uuid>,
        metadata: Value,
    ) -> Result<AnalyticsEvent, AppError> {
        self.repo
            .insert_event(&self.pool, event_type, partner_id, offer_id, &metadata)
            .await
    }

    /// Métricas do painel do parceiro. O próprio parceiro ou o staff.
    pub async fn partner_metrics(
        &self,
        actor: &AuthContext,
        partner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<PartnerMetrics, AppError> {
        if !actor.is_staff() && !actor.owns_partner(partner_id) {
            return Err(AppError::Forbidden);
        }

        let profile_views = self
            .repo
            .count_events(partner_id, AnalyticsEventType::ProfileView, since)
            .await?;
        let offer_views = self
            .repo
            .count_events(partner_id, AnalyticsEventType::OfferView, since)
            .await?;
        let leads_submitted = self
            .repo
            .count_events(partner_id, AnalyticsEventType::LeadSubmit, since)
            .await?;
        let checkout_clicks = self
            .repo
            .count_events(partner_id, AnalyticsEventType::CheckoutClick, since)
            .await?;

        Ok(PartnerMetrics::from_counts(
            profile_views,
            offer_views,
            leads_submitted,
            checkout_clicks,
        ))
    }

    /// Exportação de eventos (staff). CSV simples, uma linha por evento.
    pub async fn export_report(&self, since: Option<DateTime<Utc>>) -> Result<String, AppError> {
        let events = self.repo.list_events(since).await?;

        let mut out = String::from("eventId,eventType,partnerId,offerId,createdAt\n");
        for event in events {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                event.id,
                event.event_type.as_str(),
                event.partner_id.map(|id| id.to_string()).unwrap_or_default(),
                event.offer_id.map(|id| id.to_string()).unwrap_or_default(),
                event.created_at.to_rfc3339(),
            ));
        }

        Ok(out)
    }
}
