// src/db/contract_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contract::{ContractDeclaration, ContractStatus},
};

#[derive(Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        offer_id: Uuid,
        partner_id: Uuid,
        user_id: Uuid,
        contract_date: NaiveDate,
        contract_value: i64,
        contract_period: Option<&str>,
        comments: Option<&str>,
    ) -> Result<ContractDeclaration, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, ContractDeclaration>(
            r#"
            INSERT INTO contract_declarations (
                offer_id, partner_id, user_id,
                contract_date, contract_value, contract_period, comments
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(offer_id)
        .bind(partner_id)
        .bind(user_id)
        .bind(contract_date)
        .bind(contract_value)
        .bind(contract_period)
        .bind(comments)
        .fetch_one(executor)
        .await?;

        Ok(contract)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ContractDeclaration>, AppError> {
        let contract = sqlx::query_as::<_, ContractDeclaration>(
            "SELECT * FROM contract_declarations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    /// Fila de aprovação do admin.
    pub async fn list_pending(&self) -> Result<Vec<ContractDeclaration>, AppError> {
        let contracts = sqlx::query_as::<_, ContractDeclaration>(
            "SELECT * FROM contract_declarations WHERE status = 'PENDING' ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts)
    }

    /// Aprova/rejeita. Só mexe em declaração ainda pendente.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ContractStatus,
        reviewed_by: Uuid,
    ) -> Result<Option<ContractDeclaration>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contract = sqlx::query_as::<_, ContractDeclaration>(
            r#"
            UPDATE contract_declarations
            SET status = $2, reviewed_by = $3, reviewed_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(reviewed_by)
        .fetch_optional(executor)
        .await?;

        Ok(contract)
    }

    /// A pergunta da elegibilidade: este usuário tem contrato aprovado
    /// com este parceiro? Sempre consultado na hora, nunca cacheado.
    pub async fn has_approved_contract(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM contract_declarations
                WHERE user_id = $1 AND partner_id = $2 AND status = 'APPROVED'
            )
            "#,
        )
        .bind(user_id)
        .bind(partner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
