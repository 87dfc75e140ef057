// src/services/partner_service.rs

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{cnpj, error::AppError},
    db::{PartnerRepository, UserRepository, partner_repo::PartnerProfilePatch},
    models::{
        auth::AuthContext,
        partner::{CnpjRecord, CurationStatus, Partner, PartnerPublicProfile, PartnerTier},
    },
    services::cnpj::CnpjProvider,
};

#[derive(Clone)]
pub struct PartnerService {
    repo: PartnerRepository,
    user_repo: UserRepository,
    cnpj_provider: Arc<dyn CnpjProvider>,
    pool: PgPool,
}

impl PartnerService {
    pub fn new(
        repo: PartnerRepository,
        user_repo: UserRepository,
        cnpj_provider: Arc<dyn CnpjProvider>,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            user_repo,
            cnpj_provider,
            pool,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_name: &str,
        legal_name: &str,
        raw_cnpj: &str,
        contact_name: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
    ) -> Result<Partner, AppError> {
        // CNPJ entra de qualquer jeito (com/sem máscara) e é validado
        // antes de qualquer SQL
        let normalized = cnpj::normalize(raw_cnpj).ok_or(AppError::InvalidCnpj)?;
        if !cnpj::is_valid(&normalized) {
            return Err(AppError::InvalidCnpj);
        }

        self.repo
            .create(
                &self.pool,
                company_name,
                legal_name,
                &normalized,
                contact_name,
                contact_email,
                contact_phone,
            )
            .await
    }

    pub async fn list(&self, status: Option<CurationStatus>) -> Result<Vec<Partner>, AppError> {
        self.repo.list(status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Partner, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::PartnerNotFound)
    }

    pub async fn get_public_profile(&self, id: Uuid) -> Result<PartnerPublicProfile, AppError> {
        self.repo
            .find_public_profile(id)
            .await?
            .ok_or(AppError::PartnerNotFound)
    }

    /// Perfil é editado pelo próprio parceiro ou pelo staff, com version.
    pub async fn update_profile(
        &self,
        actor: &AuthContext,
        id: Uuid,
        expected_version: i32,
        patch: &PartnerProfilePatch<'_>,
    ) -> Result<Partner, AppError> {
        if !actor.is_staff() && !actor.owns_partner(id) {
            return Err(AppError::Forbidden);
        }

        match self
            .repo
            .update_profile(&self.pool, id, expected_version, patch)
            .await?
        {
            Some(partner) => Ok(partner),
            // UPDATE vazio: decide entre "não existe" e "version velha"
            None => {
                if self.repo.exists(id).await? {
                    Err(AppError::VersionConflict)
                } else {
                    Err(AppError::PartnerNotFound)
                }
            }
        }
    }

    /// Decisão de curadoria. Aprovação dispara o provisionamento das
    /// contas do parceiro (o resto do onboarding é externo).
    pub async fn update_curation_status(
        &self,
        id: Uuid,
        status: CurationStatus,
    ) -> Result<Partner, AppError> {
        let mut tx = self.pool.begin().await?;

        let partner = self
            .repo
            .update_curation_status(&mut *tx, id, status)
            .await?
            .ok_or(AppError::PartnerNotFound)?;

        if status == CurationStatus::Approved {
            let activated = self.user_repo.activate_partner_users(&mut *tx, id).await?;
            tracing::info!(
                "✅ Parceiro {} aprovado na curadoria ({} contas ativadas)",
                partner.company_name,
                activated
            );
        }

        tx.commit().await?;

        Ok(partner)
    }

    pub async fn update_tier(&self, id: Uuid, tier: PartnerTier) -> Result<Partner, AppError> {
        self.repo
            .update_tier(&self.pool, id, tier)
            .await?
            .ok_or(AppError::PartnerNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(AppError::PartnerNotFound);
        }
        Ok(())
    }

    /// Consulta o registro externo. A validação local de formato/dígito
    /// corta chamada inútil para CNPJ digitado errado.
    pub async fn fetch_cnpj(&self, raw_cnpj: &str) -> Result<CnpjRecord, AppError> {
        let normalized = cnpj::normalize(raw_cnpj).ok_or(AppError::InvalidCnpj)?;
        if !cnpj::is_valid(&normalized) {
            return Err(AppError::InvalidCnpj);
        }

        self.cnpj_provider.lookup(&normalized).await
    }
}
