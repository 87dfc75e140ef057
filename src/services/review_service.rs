// src/services/review_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OfferRepository, ReviewRepository},
    models::{
        auth::AuthContext,
        review::{Review, ReviewSummary},
    },
    services::contract_service::ContractService,
};

#[derive(Clone)]
pub struct ReviewService {
    repo: ReviewRepository,
    offer_repo: OfferRepository,
    contract_service: ContractService,
    pool: PgPool,
}

impl ReviewService {
    pub fn new(
        repo: ReviewRepository,
        offer_repo: OfferRepository,
        contract_service: ContractService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            offer_repo,
            contract_service,
            pool,
        }
    }

    /// Cria a avaliação de um parceiro. A permissão é re-derivada aqui,
    /// na hora: contrato aprovado vale selo de verificada; oferta de
    /// checkout libera sem selo.
    pub async fn create(
        &self,
        actor: &AuthContext,
        partner_id: Uuid,
        reviewer_name: &str,
        reviewer_company: &str,
        rating: i16,
        comment: &str,
    ) -> Result<Review, AppError> {
        let has_contract = self
            .contract_service
            .has_approved_contract(actor.user_id, partner_id)
            .await?;

        let is_verified = if has_contract {
            true
        } else if self.offer_repo.partner_has_checkout_offer(partner_id).await? {
            false
        } else {
            return Err(AppError::ReviewNotAllowed);
        };

        self.repo
            .create(
                &self.pool,
                partner_id,
                actor.user_id,
                reviewer_name,
                reviewer_company,
                rating,
                comment,
                is_verified,
            )
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Review>, AppError> {
        self.repo.list_all().await
    }

    pub async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Review>, AppError> {
        self.repo.list_by_partner(partner_id).await
    }

    /// Média + contagem para o perfil público.
    pub async fn summary_for_partner(&self, partner_id: Uuid) -> Result<ReviewSummary, AppError> {
        let ratings = self.repo.ratings_by_partner(partner_id).await?;
        Ok(ReviewSummary::from_ratings(&ratings))
    }
}
