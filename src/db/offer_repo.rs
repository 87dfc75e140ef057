// src/db/offer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::offer::{BillingPeriod, Offer, OfferFaqEntry, OfferType, OfferVariant, SaleMode},
};

#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

// Todos os campos gravados de uma oferta; o handler monta a partir do payload
pub struct OfferRecord<'a> {
    pub partner_id: Uuid,
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub offer_type: OfferType,
    pub sale_mode: SaleMode,
    pub price: Option<i64>,
    pub price_monthly: Option<i64>,
    pub price_quarterly: Option<i64>,
    pub price_annual: Option<i64>,
    pub billing_periods: &'a [BillingPeriod],
    pub success_fee_percent: i16,
    pub zopu_take_rate_percent: Option<i16>,
    pub partner_share_percent: Option<i16>,
    pub deliverables: &'a [String],
    pub is_active: bool,
}

impl OfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        record: &OfferRecord<'_>,
    ) -> Result<Offer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (
                partner_id, title, slug, description, category,
                offer_type, sale_mode,
                price, price_monthly, price_quarterly, price_annual,
                billing_periods, success_fee_percent,
                zopu_take_rate_percent, partner_share_percent,
                deliverables, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(record.partner_id)
        .bind(record.title)
        .bind(record.slug)
        .bind(record.description)
        .bind(record.category)
        .bind(record.offer_type)
        .bind(record.sale_mode)
        .bind(record.price)
        .bind(record.price_monthly)
        .bind(record.price_quarterly)
        .bind(record.price_annual)
        .bind(record.billing_periods)
        .bind(record.success_fee_percent)
        .bind(record.zopu_take_rate_percent)
        .bind(record.partner_share_percent)
        .bind(record.deliverables)
        .bind(record.is_active)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::UniqueConstraintViolation(format!(
                    "O slug '{}' já existe.",
                    record.slug
                ));
            }
            e.into()
        })?;

        Ok(offer)
    }

    /// Atualização otimista: None quando a version não bate (ou não existe).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        expected_version: i32,
        record: &OfferRecord<'_>,
    ) -> Result<Option<Offer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers SET
                title = $3,
                slug = $4,
                description = $5,
                category = $6,
                offer_type = $7,
                sale_mode = $8,
                price = $9,
                price_monthly = $10,
                price_quarterly = $11,
                price_annual = $12,
                billing_periods = $13,
                success_fee_percent = $14,
                zopu_take_rate_percent = $15,
                partner_share_percent = $16,
                deliverables = $17,
                is_active = $18,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_version)
        .bind(record.title)
        .bind(record.slug)
        .bind(record.description)
        .bind(record.category)
        .bind(record.offer_type)
        .bind(record.sale_mode)
        .bind(record.price)
        .bind(record.price_monthly)
        .bind(record.price_quarterly)
        .bind(record.price_annual)
        .bind(record.billing_periods)
        .bind(record.success_fee_percent)
        .bind(record.zopu_take_rate_percent)
        .bind(record.partner_share_percent)
        .bind(record.deliverables)
        .bind(record.is_active)
        .fetch_optional(executor)
        .await?;

        Ok(offer)
    }

    /// Catálogo público: só ofertas ativas de parceiros aprovados.
    pub async fn list_public(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Offer>, AppError> {
        let search_term = search.map(|s| format!("%{}%", s));

        let offers = sqlx::query_as::<_, Offer>(
            r#"
            SELECT o.*
            FROM offers o
            JOIN partners p ON p.id = o.partner_id
            WHERE o.is_active = TRUE
              AND p.curation_status = 'APPROVED'
              AND ($1::text IS NULL OR o.category = $1)
              AND ($2::text IS NULL OR o.title ILIKE $2 OR o.description ILIKE $2)
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(category)
        .bind(search_term)
        .fetch_all(&self.pool)
        .await?;

        Ok(offers)
    }

    /// Visão do admin: tudo, inclusive inativas e de parceiros pendentes.
    pub async fn list_all(&self) -> Result<Vec<Offer>, AppError> {
        let offers = sqlx::query_as::<_, Offer>("SELECT * FROM offers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(offers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        let offer = sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(offer)
    }

    /// Versão pública do find: respeita ativação e curadoria do parceiro.
    pub async fn find_public_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            SELECT o.*
            FROM offers o
            JOIN partners p ON p.id = o.partner_id
            WHERE o.id = $1
              AND o.is_active = TRUE
              AND p.curation_status = 'APPROVED'
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(offer)
    }

    /// O parceiro tem alguma oferta ativa vendida por checkout?
    /// (usado na elegibilidade de avaliação)
    pub async fn partner_has_checkout_offer(&self, partner_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM offers
                WHERE partner_id = $1 AND sale_mode = 'CHECKOUT' AND is_active = TRUE
            )
            "#,
        )
        .bind(partner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn partner_name(&self, partner_id: Uuid) -> Result<Option<String>, AppError> {
        let name =
            sqlx::query_scalar::<_, String>("SELECT company_name FROM partners WHERE id = $1")
                .bind(partner_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(name)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM offers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    // --- SUB-ENTIDADES ---

    /// Regrava as variantes da oferta na ordem recebida.
    /// Recebe a conexão da transação (vários statements, mesmo tx).
    pub async fn replace_variants(
        &self,
        conn: &mut sqlx::PgConnection,
        offer_id: Uuid,
        variants: &[(String, Option<i32>, Option<i64>, Option<i64>, Option<i64>)],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM offer_variants WHERE offer_id = $1")
            .bind(offer_id)
            .execute(&mut *conn)
            .await?;

        for (position, (name, user_limit, monthly, quarterly, annual)) in
            variants.iter().enumerate()
        {
            sqlx::query(
                r#"
                INSERT INTO offer_variants (
                    offer_id, position, name, user_limit,
                    price_monthly, price_quarterly, price_annual
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(offer_id)
            .bind(position as i32)
            .bind(name)
            .bind(user_limit)
            .bind(monthly)
            .bind(quarterly)
            .bind(annual)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    pub async fn replace_faq(
        &self,
        conn: &mut sqlx::PgConnection,
        offer_id: Uuid,
        entries: &[(String, String)],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM offer_faq WHERE offer_id = $1")
            .bind(offer_id)
            .execute(&mut *conn)
            .await?;

        for (position, (question, answer)) in entries.iter().enumerate() {
            sqlx::query(
                "INSERT INTO offer_faq (offer_id, position, question, answer) VALUES ($1, $2, $3, $4)",
            )
            .bind(offer_id)
            .bind(position as i32)
            .bind(question)
            .bind(answer)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    pub async fn list_variants(&self, offer_id: Uuid) -> Result<Vec<OfferVariant>, AppError> {
        let variants = sqlx::query_as::<_, OfferVariant>(
            "SELECT * FROM offer_variants WHERE offer_id = $1 ORDER BY position ASC",
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }

    pub async fn list_faq(&self, offer_id: Uuid) -> Result<Vec<OfferFaqEntry>, AppError> {
        let faq = sqlx::query_as::<_, OfferFaqEntry>(
            "SELECT * FROM offer_faq WHERE offer_id = $1 ORDER BY position ASC",
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(faq)
    }
}
