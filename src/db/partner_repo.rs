// src/db/partner_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::partner::{CurationStatus, Partner, PartnerPublicProfile, PartnerTier},
};

#[derive(Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

// Campos editáveis do perfil (o resto é controlado pela curadoria)
pub struct PartnerProfilePatch<'a> {
    pub company_name: &'a str,
    pub contact_name: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: Option<&'a str>,
    pub website: Option<&'a str>,
    pub description: Option<&'a str>,
    pub cnae_principal: Option<&'a str>,
    pub cnae_secundario: &'a [String],
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        company_name: &str,
        legal_name: &str,
        cnpj: &str,
        contact_name: &str,
        contact_email: &str,
        contact_phone: Option<&str>,
    ) -> Result<Partner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            INSERT INTO partners (
                company_name, legal_name, cnpj,
                contact_name, contact_email, contact_phone
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(company_name)
        .bind(legal_name)
        .bind(cnpj)
        .bind(contact_name)
        .bind(contact_email)
        .bind(contact_phone)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::CnpjAlreadyExists;
            }
            e.into()
        })?;

        Ok(partner)
    }

    pub async fn list(
        &self,
        curation_status: Option<CurationStatus>,
    ) -> Result<Vec<Partner>, AppError> {
        let partners = sqlx::query_as::<_, Partner>(
            r#"
            SELECT * FROM partners
            WHERE ($1::curation_status IS NULL OR curation_status = $1)
            ORDER BY company_name ASC
            "#,
        )
        .bind(curation_status)
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Partner>, AppError> {
        let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(partner)
    }

    /// Perfil público: só parceiros aprovados aparecem.
    pub async fn find_public_profile(
        &self,
        id: Uuid,
    ) -> Result<Option<PartnerPublicProfile>, AppError> {
        let profile = sqlx::query_as::<_, PartnerPublicProfile>(
            r#"
            SELECT id, company_name, tier, website, description
            FROM partners
            WHERE id = $1 AND curation_status = 'APPROVED'
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Atualização otimista do perfil: só grava se a version bater.
    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        expected_version: i32,
        patch: &PartnerProfilePatch<'_>,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            UPDATE partners SET
                company_name = $3,
                contact_name = $4,
                contact_email = $5,
                contact_phone = $6,
                website = $7,
                description = $8,
                cnae_principal = $9,
                cnae_secundario = $10,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_version)
        .bind(patch.company_name)
        .bind(patch.contact_name)
        .bind(patch.contact_email)
        .bind(patch.contact_phone)
        .bind(patch.website)
        .bind(patch.description)
        .bind(patch.cnae_principal)
        .bind(patch.cnae_secundario)
        .fetch_optional(executor)
        .await?;

        Ok(partner)
    }

    pub async fn update_curation_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: CurationStatus,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            UPDATE partners
            SET curation_status = $2, version = version + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(partner)
    }

    pub async fn update_tier<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        tier: PartnerTier,
    ) -> Result<Option<Partner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let partner = sqlx::query_as::<_, Partner>(
            r#"
            UPDATE partners
            SET tier = $2, version = version + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tier)
        .fetch_optional(executor)
        .await?;

        Ok(partner)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Existe para decidir entre 404 e 409 depois de um UPDATE otimista vazio.
    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM partners WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
