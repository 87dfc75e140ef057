// src/services/lead_service.rs

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnalyticsRepository, LeadRepository, OfferRepository},
    models::{analytics::AnalyticsEventType, lead::LeadRequest},
};

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    offer_repo: OfferRepository,
    analytics_repo: AnalyticsRepository,
    pool: PgPool,
}

impl LeadService {
    pub fn new(
        repo: LeadRepository,
        offer_repo: OfferRepository,
        analytics_repo: AnalyticsRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            offer_repo,
            analytics_repo,
            pool,
        }
    }

    /// Formulário público da oferta. Exige consentimento LGPD e só
    /// aceita lead para oferta visível no catálogo.
    #[allow(clippy::too_many_arguments)]
    pub async fn submit_request(
        &self,
        offer_id: Uuid,
        contact_name: &str,
        contact_company: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
        message: Option<&str>,
        consent: bool,
    ) -> Result<LeadRequest, AppError> {
        let offer = self
            .offer_repo
            .find_public_by_id(offer_id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        let mut tx = self.pool.begin().await?;

        let lead = self
            .repo
            .create(
                &mut *tx,
                offer.id,
                contact_name,
                contact_company,
                contact_email,
                contact_phone,
                message,
                consent,
            )
            .await?;

        // O lead do formulário conta nas métricas do parceiro
        self.analytics_repo
            .insert_event(
                &mut *tx,
                AnalyticsEventType::LeadSubmit,
                Some(offer.partner_id),
                Some(offer.id),
                &json!({ "source": "lead_form" }),
            )
            .await?;

        tx.commit().await?;

        Ok(lead)
    }

    /// Lead registrado pelo staff (ex.: contato que chegou por fora).
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        offer_id: Uuid,
        contact_name: &str,
        contact_company: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
        message: Option<&str>,
    ) -> Result<LeadRequest, AppError> {
        if !self.offer_repo.exists(offer_id).await? {
            return Err(AppError::OfferNotFound);
        }

        // Lead de balcão: o consentimento foi colhido fora do formulário
        self.repo
            .create(
                &self.pool,
                offer_id,
                contact_name,
                contact_company,
                contact_email,
                contact_phone,
                message,
                true,
            )
            .await
    }

    pub async fn list(&self, offer_id: Option<Uuid>) -> Result<Vec<LeadRequest>, AppError> {
        self.repo.list(offer_id).await
    }
}
