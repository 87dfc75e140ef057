// src/services/contract_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ContractRepository, OfferRepository},
    models::{
        auth::AuthContext,
        contract::{ContractDeclaration, ContractStatus, ReviewEligibility},
        offer::SaleMode,
    },
};

#[derive(Clone)]
pub struct ContractService {
    repo: ContractRepository,
    offer_repo: OfferRepository,
    pool: PgPool,
}

impl ContractService {
    pub fn new(repo: ContractRepository, offer_repo: OfferRepository, pool: PgPool) -> Self {
        Self {
            repo,
            offer_repo,
            pool,
        }
    }

    /// Comprador declara que fechou contrato a partir de uma oferta.
    /// Entra PENDING e espera a análise do admin.
    pub async fn declare(
        &self,
        actor: &AuthContext,
        offer_id: Uuid,
        contract_date: NaiveDate,
        contract_value: i64,
        contract_period: Option<&str>,
        comments: Option<&str>,
    ) -> Result<ContractDeclaration, AppError> {
        let offer = self
            .offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        self.repo
            .create(
                &self.pool,
                offer.id,
                offer.partner_id,
                actor.user_id,
                contract_date,
                contract_value,
                contract_period,
                comments,
            )
            .await
    }

    pub async fn list_pending(&self) -> Result<Vec<ContractDeclaration>, AppError> {
        self.repo.list_pending().await
    }

    pub async fn approve(
        &self,
        actor: &AuthContext,
        id: Uuid,
    ) -> Result<ContractDeclaration, AppError> {
        self.decide(actor, id, ContractStatus::Approved).await
    }

    pub async fn reject(
        &self,
        actor: &AuthContext,
        id: Uuid,
    ) -> Result<ContractDeclaration, AppError> {
        self.decide(actor, id, ContractStatus::Rejected).await
    }

    async fn decide(
        &self,
        actor: &AuthContext,
        id: Uuid,
        status: ContractStatus,
    ) -> Result<ContractDeclaration, AppError> {
        let contract = self
            .repo
            .set_status(&self.pool, id, status, actor.user_id)
            .await?
            // Já decidida (ou inexistente) some da fila: 404 nos dois casos
            .ok_or(AppError::ContractNotFound)?;

        tracing::info!(
            "📋 Declaração de contrato {} marcada como {:?}",
            contract.id,
            contract.status
        );

        Ok(contract)
    }

    /// Elegibilidade de avaliação SEMPRE derivada do estado atual:
    /// contrato aprovado com o parceiro, ou oferta simples de checkout.
    pub async fn check_eligibility(
        &self,
        actor: &AuthContext,
        offer_id: Uuid,
    ) -> Result<ReviewEligibility, AppError> {
        let offer = self
            .offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or(AppError::OfferNotFound)?;

        if offer.sale_mode == SaleMode::Checkout {
            return Ok(ReviewEligibility {
                eligible: true,
                reason: "checkout_offer",
            });
        }

        if self
            .repo
            .has_approved_contract(actor.user_id, offer.partner_id)
            .await?
        {
            return Ok(ReviewEligibility {
                eligible: true,
                reason: "approved_contract",
            });
        }

        Ok(ReviewEligibility {
            eligible: false,
            reason: "no_approved_contract",
        })
    }

    /// Usado pelo fluxo de criação de avaliação (recorte por parceiro).
    pub async fn has_approved_contract(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
    ) -> Result<bool, AppError> {
        self.repo.has_approved_contract(user_id, partner_id).await
    }
}
