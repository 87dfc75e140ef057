// src/services/case_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CaseRepository, PartnerRepository},
    models::partner_case::PartnerCase,
};

#[derive(Clone)]
pub struct CaseService {
    repo: CaseRepository,
    partner_repo: PartnerRepository,
    pool: PgPool,
}

impl CaseService {
    pub fn new(repo: CaseRepository, partner_repo: PartnerRepository, pool: PgPool) -> Self {
        Self {
            repo,
            partner_repo,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        partner_id: Uuid,
        title: &str,
        client_name: &str,
        segment: Option<&str>,
        summary: &str,
        results: Option<&str>,
        position: i32,
    ) -> Result<PartnerCase, AppError> {
        // Case órfão não existe
        if self.partner_repo.find_by_id(partner_id).await?.is_none() {
            return Err(AppError::PartnerNotFound);
        }

        self.repo
            .create(
                &self.pool,
                partner_id,
                title,
                client_name,
                segment,
                summary,
                results,
                position,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        client_name: &str,
        segment: Option<&str>,
        summary: &str,
        results: Option<&str>,
        position: i32,
    ) -> Result<PartnerCase, AppError> {
        self.repo
            .update(
                &self.pool,
                id,
                title,
                client_name,
                segment,
                summary,
                results,
                position,
            )
            .await?
            .ok_or(AppError::CaseNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::CaseNotFound);
        }
        Ok(())
    }

    pub async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<PartnerCase>, AppError> {
        self.repo.list_by_partner(partner_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<PartnerCase>, AppError> {
        self.repo.list_all().await
    }
}
